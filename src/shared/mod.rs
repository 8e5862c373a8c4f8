pub mod constants;
pub mod normalize;
pub mod test_helpers;
pub mod types;
pub mod validation;

mod province;
mod ward;

pub use province::Province;
pub use ward::Ward;

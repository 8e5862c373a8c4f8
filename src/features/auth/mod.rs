mod validator;

pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;

pub use routes::routes;
pub use validator::JwtValidator;

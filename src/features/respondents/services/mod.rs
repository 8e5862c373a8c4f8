pub mod respondent_service;

pub use respondent_service::RespondentService;

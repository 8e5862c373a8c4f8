//! Survey result submissions.
//!
//! A submission is one respondent's set of 1-5 answers for one survey.
//! The response row caches `point` (the answer sum) and `submitted_at`,
//! which the dashboard reads as the completion flag. Resubmitting replaces
//! the previous answers.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/results/{survey_id}` | Paginated submissions for a survey |
//! | GET | `/api/results/{survey_id}/respondents/{respondent_id}` | One submission with answers |
//! | POST | `/api/results/{survey_id}/respondents/{respondent_id}` | Submit or replace answers |
//! | DELETE | `/api/results/{survey_id}/respondents/{respondent_id}` | Clear a submission (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ResultService;

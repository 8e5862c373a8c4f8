//! Annual satisfaction surveys and their questionnaires.
//!
//! One survey per year. Questions are answered on a 1-5 scale and their
//! count is the `b` term of the satisfaction formula, so the questionnaire
//! is frozen as soon as the first result is submitted.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/surveys` | List surveys, newest year first |
//! | POST | `/api/surveys` | Create a survey (admin) |
//! | GET | `/api/surveys/{id}` | Get survey by id |
//! | PUT | `/api/surveys/{id}` | Update a survey (admin) |
//! | DELETE | `/api/surveys/{id}` | Delete a survey without results (admin) |
//! | GET | `/api/surveys/{id}/questions` | List questions in display order |
//! | POST | `/api/surveys/{id}/questions` | Add a question (admin) |
//! | PUT | `/api/surveys/questions/{id}` | Update a question (admin) |
//! | DELETE | `/api/surveys/questions/{id}` | Delete a question (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SurveyService;

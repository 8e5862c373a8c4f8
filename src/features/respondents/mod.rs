//! Survey respondent organizations (HTX/QTD).
//!
//! Each respondent is the account of one cooperative or credit fund,
//! pinned to a province and optionally a ward. The `is_member` flag marks
//! alliance membership, which weights the satisfaction scoring.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/respondents` | Paginated list with province/ward/member/search filters |
//! | POST | `/api/respondents` | Create a respondent (admin) |
//! | POST | `/api/respondents/import` | Import respondents from CSV/XLSX (admin) |
//! | GET | `/api/respondents/{id}` | Get respondent by id |
//! | PUT | `/api/respondents/{id}` | Update a respondent (admin) |
//! | DELETE | `/api/respondents/{id}` | Delete a respondent and their submissions (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RespondentService;

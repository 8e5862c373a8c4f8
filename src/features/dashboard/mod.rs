//! Public satisfaction dashboard.
//!
//! Ranks provinces by their satisfaction index for a survey year and serves
//! the headline counts. Scores are recomputed from the raw rows on every
//! request; see [`scoring`] for the formula.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/dashboard/satisfaction?year=` | Provinces ranked by satisfaction index |
//! | GET | `/api/dashboard/satisfaction/export?year=` | Same ranking as a CSV attachment |
//! | GET | `/api/dashboard/summary` | Headline counts |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod scoring;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;

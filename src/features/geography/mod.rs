//! Vietnamese administrative geography feature.
//!
//! This feature manages the two-level hierarchy used by the survey:
//! provinces/cities (tỉnh/thành phố) and their wards/communes (phường/xã).
//! Names are deduplicated case-insensitively after trimming, and records
//! referenced by survey respondents cannot be renamed or removed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/geography/provinces` | List all provinces |
//! | POST | `/api/geography/provinces` | Create a province (admin) |
//! | POST | `/api/geography/provinces/import` | Import provinces from CSV/XLSX (admin) |
//! | GET | `/api/geography/provinces/{id}` | Get province by id |
//! | PUT | `/api/geography/provinces/{id}` | Update a province (admin) |
//! | DELETE | `/api/geography/provinces/{id}` | Delete a province (admin) |
//! | GET | `/api/geography/provinces/{id}/wards` | List wards in a province |
//! | POST | `/api/geography/provinces/{id}/wards` | Create a ward (admin) |
//! | POST | `/api/geography/wards/import` | Import wards from CSV/XLSX (admin) |
//! | GET | `/api/geography/wards/{id}` | Get ward by id |
//! | PUT | `/api/geography/wards/{id}` | Rename a ward (admin) |
//! | DELETE | `/api/geography/wards/{id}` | Delete a ward (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::GeographyService;

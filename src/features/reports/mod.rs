//! Issue reports filed from the production line form.
//!
//! Reports live in the report store of the session they were submitted in and
//! disappear with it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/sessions/{id}/reports` | Submit a report (multipart) |
//! | GET | `/api/sessions/{id}/reports` | List reports, newest first |
//! | GET | `/api/reports/options` | Line and issue type choices |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;

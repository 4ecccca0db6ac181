//! Ride pickup dataset: raw rows, hourly histogram and hour filter.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/pickups/raw` | Loaded rows and column names |
//! | GET | `/api/pickups/histogram` | Pickups per hour of day |
//! | GET | `/api/pickups` | Pickups within one hour of day |
//! | DELETE | `/api/pickups/cache` | Drop cached datasets |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::PickupService;

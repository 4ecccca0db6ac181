//! Per-user sessions.
//!
//! A session is the explicit context every report operation runs against. Each
//! one owns an independent report store that lives exactly as long as the
//! session does.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/sessions` | Start a session |
//! | GET | `/api/sessions/{id}` | Session info |
//! | DELETE | `/api/sessions/{id}` | End a session |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::SessionService;
pub use workers::SessionSweeper;

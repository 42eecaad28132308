//! # drivebox-api
//!
//! The HTTP surface of Drivebox: an Axum router over the services, with
//! identity extraction, DTOs, and the `AppError` → HTTP response mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

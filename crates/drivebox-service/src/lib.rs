//! # drivebox-service
//!
//! Business logic for Drivebox: tree operations over the Item Store,
//! the sharing gate for public visibility, and the object reference
//! resolver bridging stored keys to time-limited URLs.

pub mod context;
pub mod item;
pub mod object;
pub mod share;

pub use context::RequestContext;

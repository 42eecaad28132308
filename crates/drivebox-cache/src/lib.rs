//! # drivebox-cache
//!
//! The bounded, in-memory access-URL cache. Explicitly constructed and
//! injected into the Object Reference Resolver — never a module-level
//! global. Losing the cache only costs an extra refresh call against the
//! object-storage collaborator; it is never authoritative.

pub mod provider;

pub use provider::{CachedUrl, UrlCache};

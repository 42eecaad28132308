//! # drivebox-storage
//!
//! Object-storage providers for Drivebox: presigned-URL issuance against
//! S3-compatible stores, a local-filesystem provider for development and
//! tests, object-key generation, and the signing-timestamp extraction
//! used by the URL staleness policy.

pub mod keys;
pub mod providers;
pub mod signing;

pub use providers::local::LocalObjectStore;
pub use providers::s3::S3ObjectStore;

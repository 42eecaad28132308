//! Object-storage collaborator trait.
//!
//! The application never touches object bytes on the hot path: uploads and
//! downloads go directly from the browser to the object store through
//! time-limited URLs issued here. Implementations exist for S3-compatible
//! stores and for the local filesystem (development and tests); the trait
//! is defined here in `drivebox-core` and implemented in `drivebox-storage`.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Issue a time-limited URL authorizing a single PUT of the object.
    async fn issue_put_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> AppResult<String>;

    /// Issue a time-limited URL authorizing a single GET of the object.
    async fn issue_get_url(&self, key: &str, ttl: Duration) -> AppResult<String>;

    /// Delete the object stored under the given key.
    ///
    /// Deleting a key that does not exist is not an error.
    async fn delete_object(&self, key: &str) -> AppResult<()>;

    /// Check whether the backing store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

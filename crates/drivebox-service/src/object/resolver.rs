//! Object Reference Resolver.
//!
//! Bridges an item's stored object key to fetchable, time-limited URLs,
//! with a bounded cache and a proactive staleness policy so consumers
//! rarely hit an expired URL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use drivebox_cache::{CachedUrl, UrlCache};
use drivebox_core::config::storage::StorageConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::object_store::ObjectStore;
use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::{Item, ItemPatch};
use drivebox_storage::keys::generate_object_key;
use drivebox_storage::signing;

use crate::context::RequestContext;

/// A presigned upload destination.
#[derive(Debug, Clone, Serialize)]
pub struct UploadTarget {
    /// URL authorizing a single PUT of the object bytes.
    pub upload_url: String,
    /// The storage key the object will live under.
    pub object_key: String,
    /// Lifetime of the URL in seconds.
    pub expires_in_seconds: u64,
}

/// Resolves stored object keys to time-limited URLs.
#[derive(Debug, Clone)]
pub struct ObjectUrlResolver {
    store: Arc<dyn ItemStore>,
    objects: Arc<dyn ObjectStore>,
    cache: UrlCache,
    config: StorageConfig,
}

impl ObjectUrlResolver {
    /// Creates a new resolver.
    pub fn new(
        store: Arc<dyn ItemStore>,
        objects: Arc<dyn ObjectStore>,
        cache: UrlCache,
        config: StorageConfig,
    ) -> Self {
        Self {
            store,
            objects,
            cache,
            config,
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_seconds)
    }

    fn refresh_after(&self) -> chrono::Duration {
        chrono::Duration::days(self.config.refresh_after_days)
    }

    /// Bound a collaborator call by the configured timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.request_timeout(), fut)
            .await
            .map_err(|_| AppError::upstream("Object storage request timed out"))?
    }

    /// Generate a storage key and presign an upload URL for it.
    pub async fn issue_upload_target(
        &self,
        original_name: &str,
        content_type: &str,
    ) -> AppResult<UploadTarget> {
        let object_key = generate_object_key(&self.config.key_prefix, original_name);
        let ttl = Duration::from_secs(self.config.upload_url_ttl_seconds);
        let upload_url = self
            .bounded(self.objects.issue_put_url(&object_key, content_type, ttl))
            .await?;
        Ok(UploadTarget {
            upload_url,
            object_key,
            expires_in_seconds: self.config.upload_url_ttl_seconds,
        })
    }

    /// Presign a fresh access URL for a stored object key.
    pub async fn issue_access_url(&self, object_key: &str) -> AppResult<String> {
        let ttl = Duration::from_secs(self.config.access_url_ttl_seconds);
        self.bounded(self.objects.issue_get_url(object_key, ttl))
            .await
    }

    /// Return a usable access URL for an item, refreshing it proactively.
    ///
    /// The cached URL is reused while its signing timestamp is younger than
    /// the refresh threshold; older or unparseable URLs are re-derived from
    /// the object key. If the collaborator fails, the last-known URL is
    /// returned instead of surfacing the error to the read path.
    pub async fn refresh_if_stale(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> AppResult<String> {
        let item = self
            .store
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {item_id} not found")))?;
        if item.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own this item"));
        }
        let Some(object_key) = item.object_key.clone() else {
            return Err(AppError::validation(format!(
                "Item {item_id} has no stored object"
            )));
        };

        let refresh_after = self.refresh_after();

        if let Some(cached) = self.cache.get(item_id).await {
            if chrono::Utc::now() - cached.issued_at <= refresh_after {
                return Ok(cached.url);
            }
        }

        if let Some(url) = &item.access_url {
            if !signing::is_stale(url, refresh_after) {
                self.cache
                    .insert(item_id, CachedUrl::issued_now(url.clone()))
                    .await;
                return Ok(url.clone());
            }
        }

        let fresh = match self.issue_access_url(&object_key).await {
            Ok(url) => url,
            Err(err) => {
                // Read path: a stale-but-working URL beats a hard failure.
                if let Some(last_known) = item.access_url {
                    warn!(
                        item_id = %item_id,
                        error = %err,
                        "URL refresh failed; falling back to last-known URL"
                    );
                    return Ok(last_known);
                }
                return Err(err);
            }
        };

        self.store
            .update(item_id, &ItemPatch::access_url(fresh.clone()))
            .await?;
        self.cache
            .insert(item_id, CachedUrl::issued_now(fresh.clone()))
            .await;

        info!(item_id = %item_id, "Access URL refreshed");
        Ok(fresh)
    }

    /// Record a freshly issued URL in the bounded cache.
    pub async fn remember_url(&self, item_id: ItemId, url: &str) {
        self.cache
            .insert(item_id, CachedUrl::issued_now(url.to_string()))
            .await;
    }

    /// Best-effort external cleanup for a deleted item.
    ///
    /// The database row is authoritative; failure to delete the external
    /// object is logged and swallowed — an orphaned object is preferable
    /// to an undeletable row.
    pub async fn cleanup_object(&self, item: &Item) {
        self.cache.invalidate(item.id).await;
        let Some(key) = &item.object_key else {
            return;
        };
        if let Err(err) = self.bounded(self.objects.delete_object(key)).await {
            warn!(
                item_id = %item.id,
                object_key = %key,
                error = %err,
                "Failed to delete external object; leaving orphan"
            );
        }
    }
}

//! Bounded URL cache built on moka.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;

use drivebox_core::config::cache::CacheConfig;
use drivebox_core::types::ItemId;

/// A cached access URL together with the instant it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUrl {
    /// The time-limited URL.
    pub url: String,
    /// When the URL was issued (used by the staleness policy).
    pub issued_at: DateTime<Utc>,
}

impl CachedUrl {
    /// Create a cache entry issued now.
    pub fn issued_now(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Bounded key-value store mapping item ids to their freshest access URL.
#[derive(Debug, Clone)]
pub struct UrlCache {
    cache: Cache<i64, CachedUrl>,
}

impl UrlCache {
    /// Create a new cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .build();
        Self { cache }
    }

    /// Look up the cached URL for an item.
    pub async fn get(&self, item_id: ItemId) -> Option<CachedUrl> {
        self.cache.get(&item_id.into_inner()).await
    }

    /// Store a URL for an item.
    pub async fn insert(&self, item_id: ItemId, entry: CachedUrl) {
        self.cache.insert(item_id.into_inner(), entry).await;
    }

    /// Drop the cached URL for an item (e.g., after deletion).
    pub async fn invalidate(&self, item_id: ItemId) {
        self.cache.invalidate(&item_id.into_inner()).await;
    }
}

//! Response DTOs.

use serde::{Deserialize, Serialize};

use drivebox_entity::item::Item;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Item Store reachability.
    pub database: String,
    /// Object-store provider name.
    pub storage_provider: String,
    /// Object-store reachability.
    pub storage: String,
}

/// Share-link creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// The opaque share token.
    pub share_id: String,
    /// Absolute URL a recipient can open.
    pub share_url: String,
}

/// Share resolution response: the item, plus folder contents when the
/// shared item is a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedShareResponse {
    /// The shared item.
    pub item: Item,
    /// Direct children for shared folders; empty for files.
    pub contents: Vec<Item>,
}

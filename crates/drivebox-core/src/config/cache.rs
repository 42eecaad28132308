//! URL cache configuration.

use serde::{Deserialize, Serialize};

/// Bounded in-memory URL cache configuration.
///
/// The cache is a non-authoritative optimization: losing an entry only
/// causes an extra refresh call against the object-storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached URLs.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live for cache entries in seconds.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_max_capacity() -> u64 {
    10_000
}

fn default_ttl_seconds() -> u64 {
    43_200 // 12 hours
}

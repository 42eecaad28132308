//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which provider to use: "local" or "s3".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Key prefix under which uploaded objects are stored.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// TTL in seconds for presigned upload (PUT) URLs.
    #[serde(default = "default_upload_url_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// TTL in seconds for presigned access (GET) URLs.
    #[serde(default = "default_access_url_ttl")]
    pub access_url_ttl_seconds: u64,
    /// Age in days after which a cached access URL is proactively refreshed.
    ///
    /// Must sit under the maximum signed-URL lifetime the provider allows
    /// (30 days for AWS Signature V4).
    #[serde(default = "default_refresh_after_days")]
    pub refresh_after_days: i64,
    /// Timeout in seconds for calls to the object-storage collaborator.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Local filesystem provider configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible provider configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            key_prefix: default_key_prefix(),
            upload_url_ttl_seconds: default_upload_url_ttl(),
            access_url_ttl_seconds: default_access_url_ttl(),
            refresh_after_days: default_refresh_after_days(),
            request_timeout_seconds: default_request_timeout(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for locally stored objects.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which the API serves `/objects/{key}` routes.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty = AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID. Empty = use the default credential chain.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_key_prefix() -> String {
    "uploads".to_string()
}

fn default_upload_url_ttl() -> u64 {
    900 // 15 minutes
}

fn default_access_url_ttl() -> u64 {
    604_800 // 7 days
}

fn default_refresh_after_days() -> i64 {
    25
}

fn default_request_timeout() -> u64 {
    30
}

fn default_local_root() -> String {
    "./data/objects".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

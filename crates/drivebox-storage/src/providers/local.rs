//! Local filesystem object store.
//!
//! Issues plain URLs pointing at the API's `/objects/{key}` routes with
//! `expires`/`issued` query parameters. URLs are not cryptographically
//! signed; the route enforces the expiry stamp. Suitable for development
//! and the test suite, not for multi-tenant deployments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use drivebox_core::config::storage::LocalStorageConfig;
use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::traits::object_store::ObjectStore;

/// Object store rooted in a local directory.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a new local store rooted at the configured path.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create object root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a storage key to a path under the root.
    ///
    /// Rejects empty keys and any `..` component so a crafted key cannot
    /// escape the object root.
    pub fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let clean = key.trim_start_matches('/');
        if clean.is_empty() {
            return Err(AppError::validation("Object key must not be empty"));
        }
        if Path::new(clean)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(AppError::validation(format!("Invalid object key: '{key}'")));
        }
        Ok(self.root.join(clean))
    }

    fn stamped_url(&self, key: &str, ttl: std::time::Duration) -> String {
        let now = Utc::now().timestamp();
        let expires = now + ttl.as_secs() as i64;
        format!(
            "{}/objects/{key}?expires={expires}&issued={now}",
            self.public_base_url
        )
    }

    /// Write object bytes under a key (the PUT route's backing operation).
    pub async fn write_object(&self, key: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object '{key}'"),
                e,
            )
        })?;
        debug!(key, bytes = data.len(), "Wrote object");
        Ok(())
    }

    /// Open an object for streaming (the GET route's backing operation).
    pub async fn open_object(&self, key: &str) -> AppResult<fs::File> {
        let path = self.resolve(key)?;
        fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open object '{key}'"),
                    e,
                )
            }
        })
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn issue_put_url(
        &self,
        key: &str,
        _content_type: &str,
        ttl: std::time::Duration,
    ) -> AppResult<String> {
        self.resolve(key)?;
        Ok(self.stamped_url(key, ttl))
    }

    async fn issue_get_url(&self, key: &str, ttl: std::time::Duration) -> AppResult<String> {
        self.resolve(key)?;
        Ok(self.stamped_url(key, ttl))
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object '{key}'"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }
}

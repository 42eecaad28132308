//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use drivebox_api::state::AppState;
use drivebox_core::config::app::ServerConfig;
use drivebox_core::config::cache::CacheConfig;
use drivebox_core::config::logging::LoggingConfig;
use drivebox_core::config::storage::{LocalStorageConfig, StorageConfig};
use drivebox_core::config::{AppConfig, DatabaseConfig};
use drivebox_core::traits::object_store::ObjectStore;
use drivebox_database::{ItemStore, MemoryItemStore};
use drivebox_storage::LocalObjectStore;

/// The base URL the local provider stamps into issued URLs.
pub const BASE_URL: &str = "http://localhost:8080";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle to the in-memory store for seeding and assertions
    pub store: Arc<MemoryItemStore>,
    _objects_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let objects_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            storage: StorageConfig {
                local: LocalStorageConfig {
                    root_path: objects_dir.path().to_string_lossy().to_string(),
                    public_base_url: BASE_URL.to_string(),
                },
                ..StorageConfig::default()
            },
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        };

        let store: Arc<MemoryItemStore> = Arc::new(MemoryItemStore::new());
        let local = Arc::new(
            LocalObjectStore::new(&config.storage.local)
                .await
                .expect("Failed to init local object store"),
        );

        let state = AppState::new(
            Arc::new(config),
            Arc::clone(&store) as Arc<dyn ItemStore>,
            Arc::clone(&local) as Arc<dyn ObjectStore>,
            Some(local),
        );
        let router = drivebox_api::build_router(state);

        Self {
            router,
            store,
            _objects_dir: objects_dir,
        }
    }

    /// Make a JSON request to the test app, optionally authenticated.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user {
            req = req.header("x-drivebox-user", user);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// PUT raw bytes (the browser's role in the presigned upload flow).
    pub async fn put_bytes(&self, path_and_query: &str, bytes: &[u8]) -> StatusCode {
        let req = Request::builder()
            .method("PUT")
            .uri(path_and_query)
            .header("Content-Type", "application/octet-stream")
            .body(Body::from(bytes.to_vec()))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request")
            .status()
    }

    /// GET raw bytes (downloading through an issued URL).
    pub async fn get_raw(&self, path_and_query: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("GET")
            .uri(path_and_query)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    /// Create a folder via the API and return its id.
    pub async fn create_folder(&self, user: &str, name: &str, parent_id: Option<i64>) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
                Some(user),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder creation failed: {:?}",
            response.body
        );
        response.body["data"]["id"].as_i64().expect("folder id")
    }

    /// Record an uploaded file via the API and return its id.
    pub async fn create_file(
        &self,
        user: &str,
        name: &str,
        content_type: &str,
        parent_id: Option<i64>,
    ) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/uploads/complete",
                Some(serde_json::json!({
                    "object_key": format!("uploads/test-{name}"),
                    "name": name,
                    "content_type": content_type,
                    "size": 128,
                    "folder_id": parent_id,
                })),
                Some(user),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload completion failed: {:?}",
            response.body
        );
        response.body["data"]["id"].as_i64().expect("file id")
    }
}

/// Strip the configured base URL off an issued URL, leaving the path and
/// query the router can serve.
pub fn relative(url: &str) -> String {
    url.strip_prefix(BASE_URL)
        .unwrap_or_else(|| panic!("URL '{url}' does not start with {BASE_URL}"))
        .to_string()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

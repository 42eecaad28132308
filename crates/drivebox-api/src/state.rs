//! Application state shared across all handlers.

use std::sync::Arc;

use drivebox_cache::UrlCache;
use drivebox_core::config::AppConfig;
use drivebox_core::traits::object_store::ObjectStore;
use drivebox_database::ItemStore;
use drivebox_service::item::{ItemService, TreeService};
use drivebox_service::object::{ObjectUrlResolver, UploadService};
use drivebox_service::share::ShareService;
use drivebox_storage::LocalObjectStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The Item Store backing all tree operations.
    pub store: Arc<dyn ItemStore>,
    /// The object-storage collaborator.
    pub object_store: Arc<dyn ObjectStore>,
    /// The local provider, when configured — backs the `/objects` routes.
    pub local_objects: Option<Arc<LocalObjectStore>>,
    /// Item CRUD and structural tree maintenance.
    pub item_service: Arc<ItemService>,
    /// Breadcrumbs and ancestor walks.
    pub tree_service: Arc<TreeService>,
    /// Public share links.
    pub share_service: Arc<ShareService>,
    /// Presigned upload flow.
    pub upload_service: Arc<UploadService>,
    /// Access-URL issuance and refresh.
    pub resolver: Arc<ObjectUrlResolver>,
}

impl AppState {
    /// Wire up all services over the given store and object-store backends.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn ItemStore>,
        object_store: Arc<dyn ObjectStore>,
        local_objects: Option<Arc<LocalObjectStore>>,
    ) -> Self {
        let url_cache = UrlCache::new(&config.cache);
        let resolver = Arc::new(ObjectUrlResolver::new(
            Arc::clone(&store),
            Arc::clone(&object_store),
            url_cache,
            config.storage.clone(),
        ));
        let tree_service = Arc::new(TreeService::new(Arc::clone(&store)));
        let item_service = Arc::new(ItemService::new(
            Arc::clone(&store),
            Arc::clone(&tree_service),
            Arc::clone(&resolver),
        ));
        let share_service = Arc::new(ShareService::new(Arc::clone(&store)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&store),
            Arc::clone(&resolver),
        ));

        Self {
            config,
            store,
            object_store,
            local_objects,
            item_service,
            tree_service,
            share_service,
            upload_service,
            resolver,
        }
    }
}

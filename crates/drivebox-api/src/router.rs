//! Route definitions for the Drivebox HTTP API.
//!
//! All application routes are organized by domain and mounted under
//! `/api`; the `/objects` byte routes live at the root because the local
//! provider's issued URLs point straight at them.

use axum::http::HeaderValue;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(item_routes())
        .merge(folder_routes())
        .merge(upload_routes())
        .merge(share_routes())
        .merge(search_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(object_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Item CRUD: list roots, get, rename, move, delete
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::item::list_root_items))
        .route("/items/{id}", get(handlers::item::get_item))
        .route("/items/{id}", put(handlers::item::rename_item))
        .route("/items/{id}", delete(handlers::item::delete_item))
        .route("/items/{id}/move", put(handlers::item::move_item))
}

/// Folder creation and navigation
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route(
            "/folders/{id}/children",
            get(handlers::folder::list_children),
        )
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::get_breadcrumbs),
        )
}

/// Presigned upload flow and URL refresh
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/presign", post(handlers::upload::presign_upload))
        .route(
            "/uploads/complete",
            post(handlers::upload::complete_upload),
        )
        .route(
            "/files/{id}/refresh-url",
            post(handlers::upload::refresh_url),
        )
}

/// Share creation (owner) and resolution (public)
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares", post(handlers::share::create_share))
        .route("/shares/{token}", get(handlers::share::resolve_share))
}

/// Name search
fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search::search_items))
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Object byte routes for the local provider
fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/objects/{*key}", get(handlers::object::download_object))
        .route("/objects/{*key}", put(handlers::object::upload_object))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

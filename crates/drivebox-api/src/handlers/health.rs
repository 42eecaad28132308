//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.health_check().await {
        Ok(true) => "connected",
        _ => "unreachable",
    };
    let storage = match state.object_store.health_check().await {
        Ok(true) => "available",
        _ => "unreachable",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage_provider: state.object_store.provider_type().to_string(),
        storage: storage.to_string(),
    })
}

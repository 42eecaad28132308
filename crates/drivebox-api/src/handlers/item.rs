//! Item CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};

use drivebox_core::error::AppError;
use drivebox_core::types::ItemId;

use crate::dto::request::{MoveItemRequest, RenameItemRequest};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/items — the caller's root-level items.
pub async fn list_root_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let items = state.item_service.list_root(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": items })))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state.item_service.get_item(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// PUT /api/items/{id} — rename.
pub async fn rename_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
    Json(req): Json<RenameItemRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state.item_service.rename_item(&auth, id, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// PUT /api/items/{id}/move
pub async fn move_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
    Json(req): Json<MoveItemRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state
        .item_service
        .move_item(&auth, id, req.new_parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// DELETE /api/items/{id}
///
/// Idempotent: `deleted` is false when the id was already gone.
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state.item_service.delete_item(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "deleted": deleted } }),
    ))
}

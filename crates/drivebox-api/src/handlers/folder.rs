//! Folder creation and navigation handlers.

use axum::Json;
use axum::extract::{Path, State};

use drivebox_core::error::AppError;
use drivebox_core::types::ItemId;

use crate::dto::request::CreateFolderRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let folder = state
        .item_service
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// GET /api/folders/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let children = state.item_service.list_children(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": children }),
    ))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn get_breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crumbs = state.tree_service.breadcrumbs(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": crumbs })))
}

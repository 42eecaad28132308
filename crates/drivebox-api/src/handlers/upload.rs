//! Presigned upload flow handlers.

use axum::Json;
use axum::extract::{Path, State};

use drivebox_core::error::AppError;
use drivebox_core::types::ItemId;
use drivebox_service::object::upload::{CompleteUpload, UploadRequest};

use crate::dto::request::{CompleteUploadRequest, PresignUploadRequest};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/uploads/presign
pub async fn presign_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PresignUploadRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let target = state
        .upload_service
        .issue_upload_target(
            &auth,
            &UploadRequest {
                name: req.name,
                content_type: req.content_type,
                size: req.size,
                folder_id: req.folder_id,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": target })))
}

/// POST /api/uploads/complete
pub async fn complete_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CompleteUploadRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = state
        .upload_service
        .complete_upload(
            &auth,
            &CompleteUpload {
                object_key: req.object_key,
                name: req.name,
                content_type: req.content_type,
                size: req.size,
                folder_id: req.folder_id,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": item })))
}

/// POST /api/files/{id}/refresh-url
///
/// Re-derives a fresh access URL from the stored object key when the
/// cached one has aged past the refresh threshold.
pub async fn refresh_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let url = state.resolver.refresh_if_stale(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "url": url })))
}

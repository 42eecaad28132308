//! Share link handlers.
//!
//! Creation is owner-scoped; resolution is the public read surface — the
//! token is the only credential.

use axum::Json;
use axum::extract::{Path, State};

use drivebox_core::error::AppError;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{ResolvedShareResponse, ShareLinkResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<ShareLinkResponse>, AppError> {
    let share_id = state
        .share_service
        .create_share_link(&auth, req.item_id)
        .await?;

    let base = state.config.server.public_base_url.trim_end_matches('/');
    Ok(Json(ShareLinkResponse {
        share_url: format!("{base}/shared/{share_id}"),
        share_id,
    }))
}

/// GET /api/shares/{token} — public, no identity required.
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ResolvedShareResponse>, AppError> {
    let item = state.share_service.resolve_share(&token).await?;

    let contents = if item.is_folder() {
        state.share_service.public_folder_contents(item.id).await?
    } else {
        Vec::new()
    };

    Ok(Json(ResolvedShareResponse { item, contents }))
}

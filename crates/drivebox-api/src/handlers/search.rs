//! Name search handler.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};

use drivebox_core::error::AppError;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/search?q=fragment
pub async fn search_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params
        .get("q")
        .ok_or_else(|| AppError::validation("Query parameter 'q' is required"))?;

    let items = state.item_service.search(&auth, query).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": items })))
}

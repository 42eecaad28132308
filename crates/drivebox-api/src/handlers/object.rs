//! Object byte routes backing the local provider.
//!
//! The local provider's "presigned" URLs point here. The routes enforce
//! the URL's `expires` stamp and stream bytes to and from the object
//! root; with the S3 provider configured they answer 404, since clients
//! talk to the bucket directly.

use std::collections::HashMap;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tokio_util::io::ReaderStream;

use drivebox_core::error::AppError;

use crate::state::AppState;

fn require_local(state: &AppState) -> Result<&drivebox_storage::LocalObjectStore, AppError> {
    state
        .local_objects
        .as_deref()
        .ok_or_else(|| AppError::not_found("Object serving requires the local storage provider"))
}

fn check_expiry(params: &HashMap<String, String>) -> Result<(), AppError> {
    let expires = params
        .get("expires")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| AppError::validation("Missing or invalid 'expires' parameter"))?;
    if Utc::now().timestamp() > expires {
        return Err(AppError::forbidden("URL has expired"));
    }
    Ok(())
}

/// GET /objects/{key}
pub async fn download_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let local = require_local(&state)?;
    check_expiry(&params)?;

    let file = local.open_object(&key).await?;
    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        body,
    )
        .into_response())
}

/// PUT /objects/{key}
pub async fn upload_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let local = require_local(&state)?;
    check_expiry(&params)?;

    local.write_object(&key, body).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

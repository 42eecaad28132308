//! `AuthUser` extractor — injects the identity collaborator's verdict.
//!
//! Authentication itself is external: the reverse proxy (or the identity
//! provider's middleware) verifies the session and forwards the opaque
//! user id in the `x-drivebox-user` header. A request without the header
//! never reaches an owner-scoped service method.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use drivebox_core::error::AppError;
use drivebox_core::types::OwnerId;
use drivebox_service::RequestContext;

use crate::state::AppState;

/// Header carrying the authenticated user's opaque identifier.
pub const USER_HEADER: &str = "x-drivebox-user";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let owner_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        Ok(AuthUser(RequestContext::new(OwnerId::new(owner_id))))
    }
}

//! Bearer-token auth extractor

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::response::{unauthorized, ErrorResponse};
use crate::state::AppState;
use timetrack_core::services::AuthUser;

/// The authenticated identity for a request, reconstructed from token
/// claims. Missing, malformed, and expired tokens all fail with the same
/// 401 so nothing about the credential is revealed.
pub struct CurrentUser(pub AuthUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        let claims = state
            .jwt
            .validate_token(token)
            .map_err(|_| unauthorized())?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| unauthorized())?;

        Ok(CurrentUser(AuthUser {
            id,
            email: claims.email,
            name: claims.name,
        }))
    }
}

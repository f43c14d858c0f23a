use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;
use lonca_auth::claims::Claims;
use lonca_auth::jwt::verify_token;
use lonca_core::errors::AppError;

/// Extractor that validates the bearer JWT and yields the identity claims.
///
/// Claims carry identity only; authorization state is resolved per request
/// from live data, not from the token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the member ID as UUID
    pub fn member_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid member ID in token"))
    }

    /// Get the member's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Extractor that never rejects: a missing, malformed, or expired token
/// yields `None` instead of a 401.
///
/// This is the identity-query surface the session endpoint builds on — it
/// must be idempotent and safe to call repeatedly, including before anyone
/// has logged in.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .and_then(|token| verify_token(token, &state.jwt_config).ok());

        Ok(OptionalAuthUser(claims))
    }
}

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::warn;

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;
use lonca_core::errors::AppError;

use super::model::{CanParams, CanResponse, SessionResponse};
use super::service;

/// Resolve the current session
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session resolution, anonymous or authenticated", body = SessionResponse),
        (status = 500, description = "Resolution failed; clients treat this as still-checking")
    ),
    tag = "Session",
    security((), ("bearer_auth" = []))
)]
pub async fn get_session(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
) -> Result<Json<SessionResponse>, AppError> {
    let resolution = service::resolve(&state.db, &state.permissions, claims.as_ref()).await?;
    Ok(Json(SessionResponse::from_resolution(&resolution)))
}

/// Probe one permission
///
/// Always answers; an anonymous caller, an unknown permission, or even a
/// store failure all come back as `allowed: false`.
#[utoipa::path(
    get,
    path = "/api/session/can",
    params(("permission" = String, Query, description = "Feature-area permission to probe")),
    responses(
        (status = 200, description = "Membership test result", body = CanResponse)
    ),
    tag = "Session",
    security((), ("bearer_auth" = []))
)]
pub async fn can(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Query(params): Query<CanParams>,
) -> Json<CanResponse> {
    let allowed = match service::resolve(&state.db, &state.permissions, claims.as_ref()).await {
        Ok(resolution) => resolution.has_permission(&params.permission),
        Err(e) => {
            warn!(error = %e.error, "session resolution failed during permission probe");
            false
        }
    };

    Json(CanResponse {
        permission: params.permission,
        allowed,
    })
}

//! Permission-based authorization for API routes.
//!
//! Two approaches, mirroring how the dashboard consumes the same model:
//!
//! 1. Layer-based middleware ([`require_matrix_admin`]) for whole route
//!    groups gated on the fixed matrix-admin allow-list
//! 2. Extractor-based checks via the [`require_permission!`] macro, one
//!    extractor per feature area, for individual handlers
//!
//! Both resolve the session against live data, so a role approval or a
//! matrix edit changes what an already-issued token may do.

#![allow(dead_code)]

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::session::service;
use crate::state::AppState;
use lonca_auth::claims::Claims;
use lonca_core::errors::AppError;
use lonca_models::session::{Resolution, ResolvedSession};

/// Resolves the session behind `claims` and requires `permission`.
///
/// Denials are ordered like the guard's states: a token for a vanished
/// account reads as unauthenticated, an unconfirmed email is rejected
/// before any permission is consulted, and only then is the effective set
/// tested.
pub async fn authorize(
    state: &AppState,
    claims: &Claims,
    permission: &str,
) -> Result<ResolvedSession, AppError> {
    match service::resolve(&state.db, &state.permissions, Some(claims)).await? {
        Resolution::Authenticated(session) => {
            if !session.actor.email_confirmed {
                return Err(AppError::forbidden(
                    "Email address has not been confirmed",
                ));
            }
            if !session.has_permission(permission) {
                return Err(AppError::forbidden(format!(
                    "Access denied. Missing required permission: {}",
                    permission
                )));
            }
            Ok(session)
        }
        _ => Err(AppError::unauthorized("Not authenticated")),
    }
}

/// Resolves the session behind `claims` and requires a matrix-admin role.
pub async fn authorize_matrix_admin(
    state: &AppState,
    claims: &Claims,
) -> Result<ResolvedSession, AppError> {
    match service::resolve(&state.db, &state.permissions, Some(claims)).await? {
        Resolution::Authenticated(session) => {
            if !session.actor.email_confirmed {
                return Err(AppError::forbidden(
                    "Email address has not been confirmed",
                ));
            }
            if !session.is_full_access() {
                return Err(AppError::forbidden(
                    "Access denied. Only full-access roles may edit the permission matrix.",
                ));
            }
            Ok(session)
        }
        _ => Err(AppError::unauthorized("Not authenticated")),
    }
}

/// Middleware gating a route group on the fixed matrix-admin allow-list.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use lonca::middleware::role::require_matrix_admin;
///
/// let admin_routes = Router::new()
///     .nest("/roles/matrix", init_matrix_router())
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_matrix_admin));
/// ```
pub async fn require_matrix_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if let Err(e) = authorize_matrix_admin(&state, &auth_user.0).await {
        return e.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Defines a permission-check extractor for one feature area.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn list_events(
///     RequireEventsAccess(session): RequireEventsAccess,
/// ) -> Result<Json<Response>, AppError> {
///     // session.has_permission("events") already verified
/// }
/// ```
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub lonca_models::session::ResolvedSession);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = lonca_core::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                let session =
                    $crate::middleware::role::authorize(state, &auth_user.0, $permission).await?;

                Ok($name(session))
            }
        }
    };
}

// Pre-defined permission extractors, one per catalog feature area. Feature
// routers pick the one matching their admin section.

require_permission!(RequireNewsAccess, lonca_core::permissions::NEWS);
require_permission!(RequireEventsAccess, lonca_core::permissions::EVENTS);
require_permission!(RequireMagazinesAccess, lonca_core::permissions::MAGAZINES);
require_permission!(RequireSponsorsAccess, lonca_core::permissions::SPONSORS);
require_permission!(RequireInternshipsAccess, lonca_core::permissions::INTERNSHIPS);
require_permission!(RequireSurveysAccess, lonca_core::permissions::SURVEYS);
require_permission!(RequireProductsAccess, lonca_core::permissions::PRODUCTS);
require_permission!(RequireTeamAccess, lonca_core::permissions::TEAM);
require_permission!(RequireDocumentsAccess, lonca_core::permissions::DOCUMENTS);
require_permission!(RequireUsersAccess, lonca_core::permissions::USERS);
require_permission!(RequireSlidesAccess, lonca_core::permissions::SLIDES);
require_permission!(RequireSettingsAccess, lonca_core::permissions::SETTINGS);

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::require_matrix_admin;
use crate::modules::auth::router::init_auth_router;
use crate::modules::members::router::init_members_router;
use crate::modules::roles::router::{init_matrix_router, init_role_labels_router};
use crate::modules::session::router::init_session_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/session", init_session_router())
                .nest(
                    "/roles",
                    init_role_labels_router().nest(
                        "/matrix",
                        init_matrix_router().route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            require_matrix_admin,
                        )),
                    ),
                )
                .nest("/members", init_members_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

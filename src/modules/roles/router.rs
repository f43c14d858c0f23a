use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_labels, get_matrix, reload_matrix, save_matrix};

/// Matrix routes. The caller layers the matrix-admin gate on top; nothing
/// here is reachable without it.
pub fn init_matrix_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_matrix).put(save_matrix))
        .route("/reload", post(reload_matrix))
}

/// Public role metadata (display labels).
pub fn init_role_labels_router() -> Router<AppState> {
    Router::new().route("/labels", get(get_labels))
}

use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{can, get_session};

pub fn init_session_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/can", get(can))
}

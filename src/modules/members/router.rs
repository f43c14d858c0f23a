use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{approve_role, assign_role, list_members, member_roles, remove_role};

pub fn init_members_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members))
        .route("/{id}/roles", get(member_roles).post(assign_role))
        .route("/{id}/roles/{role_key}/approve", post(approve_role))
        .route("/{id}/roles/{role_key}", delete(remove_role))
}

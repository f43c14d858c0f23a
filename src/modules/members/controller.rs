use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::middleware::role::RequireUsersAccess;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use lonca_core::errors::AppError;
use lonca_models::roles::RoleAssignment;

use super::model::{
    AssignRoleDto, MemberFilterParams, PaginatedMembersResponse, RoleAssignmentResponse,
};
use super::service;

/// List members with their role assignments
#[utoipa::path(
    get,
    path = "/api/members",
    params(
        ("search" = Option<String>, Query, description = "Substring match on name or email"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated member list", body = PaginatedMembersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
pub async fn list_members(
    State(state): State<AppState>,
    _session: RequireUsersAccess,
    Query(params): Query<MemberFilterParams>,
) -> Result<Json<PaginatedMembersResponse>, AppError> {
    let result = service::list_members(&state.db, params).await?;
    Ok(Json(result))
}

/// List one member's role assignments
#[utoipa::path(
    get,
    path = "/api/members/{id}/roles",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Role assignments, approved and pending", body = [RoleAssignment]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
pub async fn member_roles(
    State(state): State<AppState>,
    _session: RequireUsersAccess,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RoleAssignment>>, AppError> {
    let roles = service::member_roles(&state.db, id).await?;
    Ok(Json(roles))
}

/// Assign a role to a member
#[utoipa::path(
    post,
    path = "/api/members/{id}/roles",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Role assigned", body = RoleAssignmentResponse),
        (status = 400, description = "Invalid role key"),
        (status = 404, description = "Member not found")
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
pub async fn assign_role(
    State(state): State<AppState>,
    RequireUsersAccess(session): RequireUsersAccess,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignRoleDto>,
) -> Result<Json<RoleAssignmentResponse>, AppError> {
    let role_key = service::assign_role(
        &state.db,
        id,
        &dto.role,
        dto.approved,
        session.actor.id.into_inner(),
    )
    .await?;

    Ok(Json(RoleAssignmentResponse {
        message: "Role assigned successfully".to_string(),
        member_id: id.into(),
        role_key,
    }))
}

/// Approve a pending role assignment
#[utoipa::path(
    post,
    path = "/api/members/{id}/roles/{role_key}/approve",
    params(
        ("id" = Uuid, Path, description = "Member ID"),
        ("role_key" = String, Path, description = "Role key")
    ),
    responses(
        (status = 200, description = "Assignment approved", body = RoleAssignmentResponse),
        (status = 404, description = "No such assignment")
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
pub async fn approve_role(
    State(state): State<AppState>,
    RequireUsersAccess(session): RequireUsersAccess,
    Path((id, role_key)): Path<(Uuid, String)>,
) -> Result<Json<RoleAssignmentResponse>, AppError> {
    service::approve_role(&state.db, id, &role_key, session.actor.id.into_inner()).await?;

    Ok(Json(RoleAssignmentResponse {
        message: "Role assignment approved".to_string(),
        member_id: id.into(),
        role_key,
    }))
}

/// Remove a role assignment
#[utoipa::path(
    delete,
    path = "/api/members/{id}/roles/{role_key}",
    params(
        ("id" = Uuid, Path, description = "Member ID"),
        ("role_key" = String, Path, description = "Role key")
    ),
    responses(
        (status = 200, description = "Assignment removed", body = RoleAssignmentResponse),
        (status = 404, description = "No such assignment")
    ),
    tag = "Members",
    security(("bearer_auth" = []))
)]
pub async fn remove_role(
    State(state): State<AppState>,
    _session: RequireUsersAccess,
    Path((id, role_key)): Path<(Uuid, String)>,
) -> Result<Json<RoleAssignmentResponse>, AppError> {
    service::remove_role(&state.db, id, &role_key).await?;

    Ok(Json(RoleAssignmentResponse {
        message: "Role assignment removed".to_string(),
        member_id: id.into(),
        role_key,
    }))
}

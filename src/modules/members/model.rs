use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use lonca_core::pagination::{PaginationMeta, PaginationParams};
use lonca_models::ids::MemberId;
use lonca_models::members::Member;
use lonca_models::roles::RoleAssignment;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MemberFilterParams {
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberWithRoles {
    #[serde(flatten)]
    pub member: Member,
    pub roles: Vec<RoleAssignment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedMembersResponse {
    pub data: Vec<MemberWithRoles>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRoleDto {
    #[validate(length(min = 1, max = 64, message = "Role key must be 1-64 characters"))]
    pub role: String,
    /// Assignments created by an administrator may be approved on the spot;
    /// defaults to the pending state.
    #[serde(default)]
    pub approved: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleAssignmentResponse {
    pub message: String,
    pub member_id: MemberId,
    pub role_key: String,
}

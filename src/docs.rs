use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RefreshResponse,
    RefreshTokenRequest, RegisterRequestDto,
};
use crate::modules::members::model::{
    AssignRoleDto, MemberWithRoles, PaginatedMembersResponse, RoleAssignmentResponse,
};
use crate::modules::roles::model::{
    MatrixEntryDto, MatrixResponse, MatrixRowDto, RoleLabelDto, SaveMatrixDto,
};
use crate::modules::session::model::{CanResponse, RoleInfo, SessionResponse};
use lonca_core::pagination::{PaginationMeta, PaginationParams};
use lonca_models::members::Member;
use lonca_models::roles::RoleAssignment;
use lonca_models::session::SessionActor;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::session::controller::get_session,
        crate::modules::session::controller::can,
        crate::modules::roles::controller::get_matrix,
        crate::modules::roles::controller::save_matrix,
        crate::modules::roles::controller::reload_matrix,
        crate::modules::roles::controller::get_labels,
        crate::modules::members::controller::list_members,
        crate::modules::members::controller::member_roles,
        crate::modules::members::controller::assign_role,
        crate::modules::members::controller::approve_role,
        crate::modules::members::controller::remove_role,
    ),
    components(
        schemas(
            Member,
            SessionActor,
            RoleAssignment,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            RefreshResponse,
            LogoutRequest,
            MessageResponse,
            ErrorResponse,
            SessionResponse,
            RoleInfo,
            CanResponse,
            MatrixResponse,
            MatrixRowDto,
            MatrixEntryDto,
            SaveMatrixDto,
            RoleLabelDto,
            MemberWithRoles,
            PaginatedMembersResponse,
            AssignRoleDto,
            RoleAssignmentResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Member authentication endpoints"),
        (name = "Session", description = "Session resolution and permission probes"),
        (name = "Roles", description = "Role-permission matrix administration"),
        (name = "Members", description = "Member and role-assignment administration")
    ),
    info(
        title = "Lonca API",
        version = "0.1.0",
        description = "Access control and membership backend for the Lonca student association portal.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

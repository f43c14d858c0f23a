use axum::{Json, extract::State};
use tracing::info;

use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use lonca_core::errors::AppError;
use lonca_models::roles::display_name;

use super::model::{MatrixDraft, MatrixResponse, RoleLabelDto, SaveMatrixDto};
use super::service;

/// Get the role-permission matrix
#[utoipa::path(
    get,
    path = "/api/roles/matrix",
    responses(
        (status = 200, description = "The current role-permission matrix", body = MatrixResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn get_matrix(State(state): State<AppState>) -> Json<MatrixResponse> {
    // Editors want the stored truth, not the cached copy.
    let mapping = service::load_mapping(&state.db).await;
    Json(MatrixResponse::from_mapping(&mapping))
}

/// Replace the role-permission matrix
#[utoipa::path(
    put,
    path = "/api/roles/matrix",
    request_body = SaveMatrixDto,
    responses(
        (status = 200, description = "Matrix replaced", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Save failed; the store error is reported verbatim")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn save_matrix(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SaveMatrixDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let draft = MatrixDraft::from_entries(dto);
    service::replace_matrix(&state.db, draft.into_rows()).await?;

    // Every open resolver picks up the new mapping immediately.
    state.permissions.reload(&state.db).await;
    info!("role-permission matrix replaced");

    Ok(Json(MessageResponse {
        message: "Role-permission matrix saved.".to_string(),
    }))
}

/// Reload the shared mapping cache from the store
#[utoipa::path(
    post,
    path = "/api/roles/matrix/reload",
    responses(
        (status = 200, description = "Cache reloaded", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn reload_matrix(State(state): State<AppState>) -> Json<MessageResponse> {
    state.permissions.reload(&state.db).await;
    Json(MessageResponse {
        message: "Role-permission mapping reloaded.".to_string(),
    })
}

/// List display labels for every mapped role
#[utoipa::path(
    get,
    path = "/api/roles/labels",
    responses(
        (status = 200, description = "Role display labels", body = [RoleLabelDto])
    ),
    tag = "Roles"
)]
pub async fn get_labels(State(state): State<AppState>) -> Json<Vec<RoleLabelDto>> {
    let mapping = state.permissions.snapshot().await;
    let mut labels: Vec<RoleLabelDto> = mapping
        .roles()
        .map(|role| RoleLabelDto {
            key: role.to_string(),
            label: display_name(role.as_str()).to_string(),
        })
        .collect();
    labels.sort_by(|a, b| a.key.cmp(&b.key));
    Json(labels)
}

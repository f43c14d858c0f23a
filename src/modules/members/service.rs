use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lonca_core::errors::AppError;
use lonca_core::pagination::PaginationMeta;
use lonca_models::members::Member;
use lonca_models::roles::{RoleAssignment, normalize_key};

use super::model::{MemberFilterParams, MemberWithRoles, PaginatedMembersResponse};

#[instrument(skip(db))]
pub async fn list_members(
    db: &PgPool,
    params: MemberFilterParams,
) -> Result<PaginatedMembersResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();
    let search = params
        .search
        .as_deref()
        .map(|s| format!("%{}%", s.trim()))
        .unwrap_or_else(|| "%".to_string());

    let members = sqlx::query_as::<_, Member>(
        "SELECT id, first_name, last_name, email, email_confirmed, created_at, updated_at
         FROM members
         WHERE first_name || ' ' || last_name ILIKE $1 OR email ILIKE $1
         ORDER BY last_name, first_name
         LIMIT $2 OFFSET $3",
    )
    .bind(&search)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM members
         WHERE first_name || ' ' || last_name ILIKE $1 OR email ILIKE $1",
    )
    .bind(&search)
    .fetch_one(db)
    .await?;

    let mut data = Vec::with_capacity(members.len());
    for member in members {
        let roles = member_roles(db, member.id.into_inner()).await?;
        data.push(MemberWithRoles { member, roles });
    }

    let has_more = offset + (data.len() as i64) < total;
    let meta = PaginationMeta {
        total,
        limit,
        offset: Some(offset),
        page: params.pagination.page(),
        has_more,
    };

    Ok(PaginatedMembersResponse { data, meta })
}

/// Every assignment for one member, approved or pending.
#[instrument(skip(db))]
pub async fn member_roles(db: &PgPool, member_id: Uuid) -> Result<Vec<RoleAssignment>, AppError> {
    let roles = sqlx::query_as::<_, RoleAssignment>(
        "SELECT member_id, role_key, approved, assigned_at, approved_by
         FROM role_assignments
         WHERE member_id = $1
         ORDER BY role_key",
    )
    .bind(member_id)
    .fetch_all(db)
    .await?;

    Ok(roles)
}

/// Links a role to a member. Re-assigning an existing role is a no-op
/// rather than an error.
#[instrument(skip(db))]
pub async fn assign_role(
    db: &PgPool,
    member_id: Uuid,
    role: &str,
    approved: bool,
    assigned_by: Uuid,
) -> Result<String, AppError> {
    let role_key = normalize_key(role);
    if role_key.is_empty() {
        return Err(AppError::bad_request(anyhow!(
            "'{}' is not a valid role key",
            role
        )));
    }

    ensure_member_exists(db, member_id).await?;

    sqlx::query(
        "INSERT INTO role_assignments (member_id, role_key, approved, approved_by)
         VALUES ($1, $2, $3, CASE WHEN $3 THEN $4 END)
         ON CONFLICT (member_id, role_key) DO NOTHING",
    )
    .bind(member_id)
    .bind(&role_key)
    .bind(approved)
    .bind(assigned_by)
    .execute(db)
    .await?;

    Ok(role_key)
}

/// Approves a pending assignment, activating it for permission purposes.
#[instrument(skip(db))]
pub async fn approve_role(
    db: &PgPool,
    member_id: Uuid,
    role_key: &str,
    approved_by: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE role_assignments
         SET approved = true, approved_by = $3
         WHERE member_id = $1 AND role_key = $2",
    )
    .bind(member_id)
    .bind(role_key)
    .bind(approved_by)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!(
            "Member does not have this role assigned"
        )));
    }

    Ok(())
}

#[instrument(skip(db))]
pub async fn remove_role(db: &PgPool, member_id: Uuid, role_key: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        "DELETE FROM role_assignments WHERE member_id = $1 AND role_key = $2",
    )
    .bind(member_id)
    .bind(role_key)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!(
            "Member does not have this role assigned"
        )));
    }

    Ok(())
}

async fn ensure_member_exists(db: &PgPool, member_id: Uuid) -> Result<(), AppError> {
    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM members WHERE id = $1")
        .bind(member_id)
        .fetch_optional(db)
        .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(anyhow!("Member not found")))
}

//! First-run bootstrap commands.
//!
//! Full-access accounts cannot be created through the API (the approval
//! flow would be circular: someone has to approve the first approver), so
//! `create-admin` exists as an argv-intercepted command on the server
//! binary, alongside `seed-matrix` which installs the default
//! role-permission matrix.

use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::roles::service::fallback_mapping;
use lonca_core::password::hash_password;
use lonca_core::permissions;
use lonca_models::roles::{PermissionKey, RoleKey, RolePermissionMap, normalize_key};

/// Default grants for the non-privileged teams, installed by `seed-matrix`
/// on top of the full-catalog grants for the full-access roles.
const DEFAULT_TEAM_GRANTS: &[(&str, &[&str])] = &[
    (
        "sosyal_medya",
        &[permissions::NEWS, permissions::EVENTS, permissions::SLIDES],
    ),
    (
        "dergi_ekibi",
        &[permissions::MAGAZINES, permissions::DOCUMENTS],
    ),
    (
        "sponsorluk_ekibi",
        &[permissions::SPONSORS, permissions::INTERNSHIPS],
    ),
    ("tasarim_ekibi", &[permissions::SLIDES, permissions::TEAM]),
    ("etkinlik_ekibi", &[permissions::EVENTS, permissions::SURVEYS]),
];

/// Creates a member with a confirmed email and an already-approved role.
pub async fn create_admin(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<()> {
    let role_key = normalize_key(role);
    if role_key.is_empty() {
        anyhow::bail!("'{}' is not a valid role key", role);
    }

    let hashed = hash_password(password).map_err(|e| e.error)?;

    let (member_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO members (first_name, last_name, email, password, email_confirmed)
         VALUES ($1, $2, $3, $4, true)
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        "INSERT INTO role_assignments (member_id, role_key, approved)
         VALUES ($1, $2, true)
         ON CONFLICT (member_id, role_key) DO UPDATE SET approved = true",
    )
    .bind(member_id)
    .bind(&role_key)
    .execute(pool)
    .await?;

    Ok(())
}

/// The matrix installed on a fresh database: full catalog for the
/// full-access roles plus sensible starting grants for each team.
pub fn default_matrix() -> RolePermissionMap {
    let mut mapping = fallback_mapping();
    for (role, grants) in DEFAULT_TEAM_GRANTS {
        for permission in *grants {
            mapping.grant(RoleKey::from(*role), PermissionKey::from(*permission));
        }
    }
    mapping
}

/// Seeds the default matrix. Existing pairs are left alone, so re-running
/// is safe and never downgrades an edited matrix.
pub async fn seed_matrix(pool: &PgPool) -> anyhow::Result<()> {
    for row in default_matrix().into_rows() {
        sqlx::query(
            "INSERT INTO role_permissions (role_key, permission_key)
             VALUES ($1, $2)
             ON CONFLICT (role_key, permission_key) DO NOTHING",
        )
        .bind(&row.role_key)
        .bind(&row.permission_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_includes_fallback() {
        let mapping = default_matrix();
        for role in permissions::FULL_ACCESS_ROLES {
            for permission in permissions::CATALOG {
                assert!(mapping.contains(role, permission));
            }
        }
    }

    #[test]
    fn test_default_matrix_team_grants_are_scoped() {
        let mapping = default_matrix();
        assert!(mapping.contains("dergi_ekibi", "magazines"));
        assert!(!mapping.contains("dergi_ekibi", "users"));
        assert!(!mapping.contains("sosyal_medya", "settings"));
    }
}

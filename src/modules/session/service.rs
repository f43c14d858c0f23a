//! Session resolution.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::members::service::member_roles;
use crate::modules::roles::service::PermissionCache;
use lonca_auth::claims::Claims;
use lonca_core::errors::AppError;
use lonca_models::ids::MemberId;
use lonca_models::roles::{RoleAssignment, RoleKey};
use lonca_models::session::{Resolution, ResolvedSession, SessionActor};

#[derive(sqlx::FromRow)]
struct ActorRow {
    id: MemberId,
    email: String,
    email_confirmed: bool,
}

/// Resolves the current actor and their effective permission set.
///
/// - No claims → [`Resolution::Anonymous`].
/// - Claims whose subject no longer matches a member row → `Anonymous`
///   (a valid token for a deleted account authenticates nobody).
/// - Otherwise the effective set is the union of the cached mapping's sets
///   for every *approved* role. Zero approved roles still resolves as
///   authenticated; the guard surfaces that as "awaiting approval" rather
///   than a silent login redirect.
///
/// Resolution is idempotent: the same member, assignments, and mapping
/// yield the same effective set every time.
#[instrument(skip(db, cache, claims))]
pub async fn resolve(
    db: &PgPool,
    cache: &PermissionCache,
    claims: Option<&Claims>,
) -> Result<Resolution, AppError> {
    let Some(claims) = claims else {
        return Ok(Resolution::Anonymous);
    };
    let Ok(member_id) = Uuid::parse_str(&claims.sub) else {
        return Ok(Resolution::Anonymous);
    };

    let actor = sqlx::query_as::<_, ActorRow>(
        "SELECT id, email, email_confirmed FROM members WHERE id = $1",
    )
    .bind(member_id)
    .fetch_optional(db)
    .await?;

    let Some(actor) = actor else {
        return Ok(Resolution::Anonymous);
    };

    let assignments = member_roles(db, member_id).await?;
    let roles = approved_role_keys(&assignments);
    let permissions = cache.union_for(&roles).await;

    Ok(Resolution::Authenticated(ResolvedSession {
        actor: SessionActor {
            id: actor.id,
            email: actor.email,
            email_confirmed: actor.email_confirmed,
        },
        roles,
        permissions,
    }))
}

/// Only approved assignments contribute to the effective set; pending ones
/// exist in the table but grant nothing.
pub fn approved_role_keys(assignments: &[RoleAssignment]) -> Vec<RoleKey> {
    assignments
        .iter()
        .filter(|a| a.approved)
        .map(|a| a.role_key.clone())
        .collect()
}

//! Mapping loader, shared cache, and the full-replacement save path.

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{instrument, warn};

use lonca_core::errors::AppError;
use lonca_core::permissions::{CATALOG, FULL_ACCESS_ROLES};
use lonca_models::roles::{PermissionKey, RoleKey, RolePermissionMap, RolePermissionRow};

/// Fetches all `(role, permission)` pairs. The catalog is small (tens of
/// roles, a dozen permissions) so no pagination is involved.
async fn fetch_rows(db: &PgPool) -> Result<Vec<RolePermissionRow>, sqlx::Error> {
    sqlx::query_as::<_, RolePermissionRow>(
        "SELECT role_key, permission_key FROM role_permissions",
    )
    .fetch_all(db)
    .await
}

/// Loads the role → permission mapping from the store.
///
/// This never fails: any fetch error is logged and replaced by
/// [`fallback_mapping`], so the full-access roles stay operational through
/// a store outage instead of the whole admin surface going dark.
#[instrument(skip(db))]
pub async fn load_mapping(db: &PgPool) -> RolePermissionMap {
    match fetch_rows(db).await {
        Ok(rows) => RolePermissionMap::from_rows(rows),
        Err(e) => {
            warn!(error = %e, "failed to load role permissions, using fallback mapping");
            fallback_mapping()
        }
    }
}

/// The built-in mapping used when the store cannot be read: the full
/// catalog for each full-access role, nothing for anyone else.
pub fn fallback_mapping() -> RolePermissionMap {
    let mut mapping = RolePermissionMap::new();
    for role in FULL_ACCESS_ROLES {
        for permission in CATALOG {
            mapping.grant(RoleKey::from(role), PermissionKey::from(permission));
        }
    }
    mapping
}

/// Shared, read-mostly handle on the role → permission mapping.
///
/// One instance lives in `AppState`, created before the router serves
/// traffic. There is no TTL; the only writers are [`Self::reload`] (called
/// after a matrix save and by the explicit reload endpoint) and the
/// initial load.
#[derive(Clone)]
pub struct PermissionCache {
    inner: Arc<RwLock<RolePermissionMap>>,
}

impl PermissionCache {
    /// Loads the mapping and wraps it. Await this before anything that
    /// calls [`Self::union_for`]; an unloaded mapping would fail closed,
    /// but callers should never observe that state.
    pub async fn load(db: &PgPool) -> Self {
        Self::from_mapping(load_mapping(db).await)
    }

    /// Wraps an already-built mapping (tests, bootstrap).
    pub fn from_mapping(mapping: RolePermissionMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(mapping)),
        }
    }

    /// Re-reads the mapping from the store, replacing the cached copy.
    pub async fn reload(&self, db: &PgPool) {
        let mapping = load_mapping(db).await;
        *self.inner.write().await = mapping;
    }

    /// The effective permission set for a set of roles: the union of each
    /// role's mapped set, computed against the cached mapping.
    pub async fn union_for(&self, roles: &[RoleKey]) -> HashSet<PermissionKey> {
        self.inner.read().await.union_for(roles)
    }

    /// A point-in-time copy of the whole mapping.
    pub async fn snapshot(&self) -> RolePermissionMap {
        self.inner.read().await.clone()
    }
}

/// Replaces the entire stored mapping with `rows`.
///
/// Delete-all-then-bulk-insert, wrapped in one transaction: the matrix is
/// small enough that full replacement beats diffing, and the transaction
/// keeps concurrent readers from ever observing the half-replaced table.
/// Last full save wins; the caller reloads the shared cache afterwards.
#[instrument(skip(db, rows), fields(row_count = rows.len()))]
pub async fn replace_matrix(db: &PgPool, rows: Vec<RolePermissionRow>) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM role_permissions")
        .execute(&mut *tx)
        .await?;

    for row in &rows {
        sqlx::query("INSERT INTO role_permissions (role_key, permission_key) VALUES ($1, $2)")
            .bind(&row.role_key)
            .bind(&row.permission_key)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

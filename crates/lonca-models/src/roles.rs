//! Role and permission domain models.
//!
//! Roles and permissions are open, string-keyed sets: new roles are added
//! purely as data, never as code. The [`RoleKey`] and [`PermissionKey`]
//! newtypes keep the two namespaces from being mixed up at call sites while
//! staying transparent at the store and wire boundaries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use utoipa::ToSchema;

use crate::ids::MemberId;

/// A role identifier, e.g. `baskan` or `teknik_ekip`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(transparent)]
#[sqlx(transparent)]
#[schema(value_type = String)]
pub struct RoleKey(String);

/// A feature-area permission identifier, e.g. `events` or `documents`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(transparent)]
#[sqlx(transparent)]
#[schema(value_type = String)]
pub struct PermissionKey(String);

macro_rules! string_key_impls {
    ($name:ident) => {
        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        // Allows `&str` lookups in maps and sets keyed by the newtype.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_key_impls!(RoleKey);
string_key_impls!(PermissionKey);

/// Normalizes an admin-entered role name into a key: lowercased, spaces and
/// hyphens become underscores, anything else non-alphanumeric is dropped
/// into an underscore, runs collapse, ends are trimmed.
pub fn normalize_key(name: &str) -> String {
    let mut result = String::new();
    let mut prev_underscore = true; // swallow leading underscores
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            result.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            result.push('_');
            prev_underscore = true;
        }
    }
    result.trim_end_matches('_').to_string()
}

/// Human-readable label for a role key.
///
/// The table is static on purpose: labels are presentation data, and an
/// unknown key echoes back unchanged instead of erroring so that roles added
/// purely via data still render.
pub fn display_name(key: &str) -> &str {
    match key {
        "baskan" => "Başkan",
        "baskan_yardimcisi" => "Başkan Yardımcısı",
        "teknik_ekip" => "Teknik Ekip",
        "sosyal_medya" => "Sosyal Medya Ekibi",
        "tasarim_ekibi" => "Tasarım Ekibi",
        "dergi_ekibi" => "Dergi Ekibi",
        "sponsorluk_ekibi" => "Sponsorluk Ekibi",
        "etkinlik_ekibi" => "Etkinlik Ekibi",
        "uye" => "Üye",
        other => other,
    }
}

/// One `(role, permission)` pair as stored in the `role_permissions` table.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, FromRow, ToSchema,
)]
pub struct RolePermissionRow {
    pub role_key: RoleKey,
    pub permission_key: PermissionKey,
}

/// A member's link to a role, active only once `approved` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoleAssignment {
    pub member_id: MemberId,
    pub role_key: RoleKey,
    pub approved: bool,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
    pub approved_by: Option<MemberId>,
}

/// The full role → permission-set mapping.
///
/// Set semantics throughout: a permission either is or is not granted to a
/// role, duplicates collapse, order never matters. Roles without an entry
/// resolve to the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePermissionMap {
    entries: HashMap<RoleKey, HashSet<PermissionKey>>,
}

impl RolePermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups raw `(role, permission)` rows by role.
    pub fn from_rows(rows: impl IntoIterator<Item = RolePermissionRow>) -> Self {
        let mut map = Self::new();
        for row in rows {
            map.grant(row.role_key, row.permission_key);
        }
        map
    }

    /// Adds `permission` to `role`'s set, creating the entry if needed.
    pub fn grant(&mut self, role: RoleKey, permission: PermissionKey) {
        self.entries.entry(role).or_default().insert(permission);
    }

    /// Removes `permission` from `role`'s set, dropping the role entry once
    /// it empties. Returns whether anything was removed.
    pub fn revoke(&mut self, role: &str, permission: &str) -> bool {
        let Some(set) = self.entries.get_mut(role) else {
            return false;
        };
        let removed = set.remove(permission);
        if set.is_empty() {
            self.entries.remove(role);
        }
        removed
    }

    /// The permission set for one role; `None` for unknown roles.
    pub fn permissions_for(&self, role: &str) -> Option<&HashSet<PermissionKey>> {
        self.entries.get(role)
    }

    /// Whether `role` holds `permission`. Unknown roles hold nothing.
    pub fn contains(&self, role: &str, permission: &str) -> bool {
        self.entries
            .get(role)
            .is_some_and(|set| set.contains(permission))
    }

    /// The union of the permission sets of every given role. Roles without a
    /// mapping entry contribute nothing.
    pub fn union_for(&self, roles: &[RoleKey]) -> HashSet<PermissionKey> {
        let mut effective = HashSet::new();
        for role in roles {
            if let Some(set) = self.entries.get(role.as_str()) {
                effective.extend(set.iter().cloned());
            }
        }
        effective
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoleKey, &HashSet<PermissionKey>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens the mapping back into store rows, sorted for stable output.
    pub fn into_rows(self) -> Vec<RolePermissionRow> {
        let mut rows: Vec<RolePermissionRow> = self
            .entries
            .into_iter()
            .flat_map(|(role, permissions)| {
                permissions.into_iter().map(move |permission| {
                    RolePermissionRow {
                        role_key: role.clone(),
                        permission_key: permission,
                    }
                })
            })
            .collect();
        rows.sort();
        rows
    }
}

impl FromIterator<(RoleKey, PermissionKey)> for RolePermissionMap {
    fn from_iter<T: IntoIterator<Item = (RoleKey, PermissionKey)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (role, permission) in iter {
            map.grant(role, permission);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str, permission: &str) -> RolePermissionRow {
        RolePermissionRow {
            role_key: RoleKey::from(role),
            permission_key: PermissionKey::from(permission),
        }
    }

    #[test]
    fn test_from_rows_collapses_duplicates() {
        let map = RolePermissionMap::from_rows(vec![
            row("dergi_ekibi", "magazines"),
            row("dergi_ekibi", "magazines"),
            row("dergi_ekibi", "documents"),
        ]);
        assert_eq!(map.permissions_for("dergi_ekibi").unwrap().len(), 2);
    }

    #[test]
    fn test_union_for_multiple_roles() {
        let map = RolePermissionMap::from_rows(vec![
            row("etkinlik_ekibi", "events"),
            row("sosyal_medya", "events"),
            row("sosyal_medya", "news"),
        ]);
        let effective = map.union_for(&[
            RoleKey::from("etkinlik_ekibi"),
            RoleKey::from("sosyal_medya"),
        ]);
        assert_eq!(effective.len(), 2);
        assert!(effective.contains("events"));
        assert!(effective.contains("news"));
    }

    #[test]
    fn test_union_tolerates_unknown_role() {
        let map = RolePermissionMap::from_rows(vec![row("sosyal_medya", "news")]);
        let effective = map.union_for(&[RoleKey::from("sosyal_medya"), RoleKey::from("hayalet")]);
        assert_eq!(effective.len(), 1);
    }

    #[test]
    fn test_contains_unknown_role_is_false() {
        let map = RolePermissionMap::new();
        assert!(!map.contains("hayalet", "events"));
    }

    #[test]
    fn test_into_rows_roundtrip() {
        let original = RolePermissionMap::from_rows(vec![
            row("sosyal_medya", "news"),
            row("sosyal_medya", "slides"),
            row("dergi_ekibi", "magazines"),
        ]);
        let rebuilt = RolePermissionMap::from_rows(original.clone().into_rows());
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Sosyal Medya"), "sosyal_medya");
        assert_eq!(normalize_key("Dergi-Ekibi"), "dergi_ekibi");
        assert_eq!(normalize_key("Teknik  Ekip"), "teknik_ekip");
        assert_eq!(normalize_key("  Uye2024  "), "uye2024");
    }

    #[test]
    fn test_display_name_known_and_unknown() {
        assert_eq!(display_name("baskan"), "Başkan");
        assert_eq!(display_name("teknik_ekip"), "Teknik Ekip");
        assert_eq!(display_name("yeni_ekip"), "yeni_ekip");
    }

    #[test]
    fn test_str_lookup_through_borrow() {
        let mut set = HashSet::new();
        set.insert(PermissionKey::from("events"));
        assert!(set.contains("events"));
        assert!(!set.contains("documents"));
    }
}

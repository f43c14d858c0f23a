//! Session resolution types.
//!
//! A session resolution answers "who is this actor and what can they do".
//! The same types feed two consumers: the route guard deciding what a
//! protected dashboard region renders, and the server's request-path
//! enforcement deciding whether a handler runs.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::ids::MemberId;
use crate::roles::{PermissionKey, RoleKey};
use lonca_core::permissions::FULL_ACCESS_ROLES;

/// The identity part of a resolved session, read-only from this
/// subsystem's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionActor {
    pub id: MemberId,
    pub email: String,
    pub email_confirmed: bool,
}

/// A fully resolved, authenticated session: the actor, their approved roles
/// and the effective permission set derived from the role-permission
/// mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub actor: SessionActor,
    /// Approved roles only; unapproved assignments grant nothing.
    pub roles: Vec<RoleKey>,
    /// Union of the mapping's sets for every approved role.
    pub permissions: HashSet<PermissionKey>,
}

impl ResolvedSession {
    /// Membership test against the effective set. Never errors.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Whether any of the given permissions is held.
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// Whether the actor holds one of the fixed matrix-admin roles.
    pub fn is_full_access(&self) -> bool {
        self.roles
            .iter()
            .any(|r| FULL_ACCESS_ROLES.contains(&r.as_str()))
    }

    /// An authenticated member with zero approved roles is pending review;
    /// the guard renders this distinctly from "not logged in".
    pub fn is_pending_approval(&self) -> bool {
        self.roles.is_empty()
    }
}

/// The outcome of one session-resolution attempt, as seen by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The resolver's fetch is still in flight.
    Pending,
    /// The resolver errored. Deliberately indistinguishable from `Pending`
    /// for rendering purposes so a transient blip never flashes a denial.
    Failed,
    /// The identity provider reported no authenticated actor.
    Anonymous,
    /// An authenticated actor with derived authorization state.
    Authenticated(ResolvedSession),
}

impl Resolution {
    /// Safe membership probe: `false` for anything but an authenticated
    /// session holding the permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            Resolution::Authenticated(session) => session.has_permission(permission),
            _ => false,
        }
    }

    /// Whether the resolver has produced a usable answer.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Resolution::Pending | Resolution::Failed)
    }

    pub fn session(&self) -> Option<&ResolvedSession> {
        match self {
            Resolution::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(roles: &[&str], permissions: &[&str]) -> ResolvedSession {
        ResolvedSession {
            actor: SessionActor {
                id: MemberId::from_uuid(Uuid::new_v4()),
                email: "uye@example.com".to_string(),
                email_confirmed: true,
            },
            roles: roles.iter().map(|r| RoleKey::from(*r)).collect(),
            permissions: permissions.iter().map(|p| PermissionKey::from(*p)).collect(),
        }
    }

    #[test]
    fn test_has_permission_membership() {
        let s = session(&["sosyal_medya"], &["news", "events"]);
        assert!(s.has_permission("news"));
        assert!(!s.has_permission("documents"));
    }

    #[test]
    fn test_has_any_permission() {
        let s = session(&["sosyal_medya"], &["news"]);
        assert!(s.has_any_permission(&["documents", "news"]));
        assert!(!s.has_any_permission(&["documents", "users"]));
    }

    #[test]
    fn test_is_full_access() {
        assert!(session(&["baskan"], &[]).is_full_access());
        assert!(session(&["uye", "teknik_ekip"], &[]).is_full_access());
        assert!(!session(&["uye"], &[]).is_full_access());
    }

    #[test]
    fn test_pending_approval() {
        assert!(session(&[], &[]).is_pending_approval());
        assert!(!session(&["uye"], &[]).is_pending_approval());
    }

    #[test]
    fn test_resolution_has_permission_is_safe() {
        assert!(!Resolution::Pending.has_permission("events"));
        assert!(!Resolution::Failed.has_permission("events"));
        assert!(!Resolution::Anonymous.has_permission("events"));
        assert!(Resolution::Authenticated(session(&[], &["events"])).has_permission("events"));
    }

    #[test]
    fn test_is_settled() {
        assert!(!Resolution::Pending.is_settled());
        assert!(!Resolution::Failed.is_settled());
        assert!(Resolution::Anonymous.is_settled());
        assert!(Resolution::Authenticated(session(&[], &[])).is_settled());
    }
}

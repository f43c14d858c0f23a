//! Session response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use lonca_models::roles::display_name;
use lonca_models::session::{Resolution, SessionActor};

/// One role with its display label, as shown in the dashboard header.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleInfo {
    pub key: String,
    pub label: String,
}

/// The dashboard's bootstrap payload.
///
/// Always `200`: an anonymous caller gets `authenticated: false` with
/// empty authorization state rather than an error, because the SPA calls
/// this before it knows whether anyone is logged in.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<SessionActor>,
    /// Authenticated with zero approved roles: membership awaiting review.
    pub pending_approval: bool,
    pub roles: Vec<RoleInfo>,
    pub permissions: Vec<String>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            member: None,
            pending_approval: false,
            roles: vec![],
            permissions: vec![],
        }
    }

    pub fn from_resolution(resolution: &Resolution) -> Self {
        let Some(session) = resolution.session() else {
            return Self::anonymous();
        };

        let roles = session
            .roles
            .iter()
            .map(|role| RoleInfo {
                key: role.to_string(),
                label: display_name(role.as_str()).to_string(),
            })
            .collect();

        let mut permissions: Vec<String> =
            session.permissions.iter().map(|p| p.to_string()).collect();
        permissions.sort();

        Self {
            authenticated: true,
            member: Some(session.actor.clone()),
            pending_approval: session.is_pending_approval(),
            roles,
            permissions,
        }
    }
}

/// Query for the safe permission probe.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CanParams {
    pub permission: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CanResponse {
    pub permission: String,
    pub allowed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lonca_models::ids::MemberId;
    use lonca_models::roles::{PermissionKey, RoleKey};
    use lonca_models::session::ResolvedSession;

    #[test]
    fn test_anonymous_response() {
        let response = SessionResponse::from_resolution(&Resolution::Anonymous);
        assert!(!response.authenticated);
        assert!(response.member.is_none());
        assert!(response.permissions.is_empty());
    }

    #[test]
    fn test_authenticated_response_labels_and_sorted_permissions() {
        let resolution = Resolution::Authenticated(ResolvedSession {
            actor: SessionActor {
                id: MemberId::new(),
                email: "uye@example.com".to_string(),
                email_confirmed: true,
            },
            roles: vec![RoleKey::from("dergi_ekibi")],
            permissions: [PermissionKey::from("magazines"), PermissionKey::from("documents")]
                .into_iter()
                .collect(),
        });

        let response = SessionResponse::from_resolution(&resolution);
        assert!(response.authenticated);
        assert!(!response.pending_approval);
        assert_eq!(response.roles[0].label, "Dergi Ekibi");
        assert_eq!(response.permissions, vec!["documents", "magazines"]);
    }

    #[test]
    fn test_pending_approval_flagged() {
        let resolution = Resolution::Authenticated(ResolvedSession {
            actor: SessionActor {
                id: MemberId::new(),
                email: "yeni@example.com".to_string(),
                email_confirmed: true,
            },
            roles: vec![],
            permissions: Default::default(),
        });

        let response = SessionResponse::from_resolution(&resolution);
        assert!(response.authenticated);
        assert!(response.pending_approval);
    }
}

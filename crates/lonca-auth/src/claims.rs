//! JWT claim structures for authentication tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// Access tokens carry identity only. Authorization state (approved roles,
/// effective permissions, email confirmation) is looked up at resolution
/// time so that role approvals and matrix edits apply to already-issued
/// tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Member ID (subject claim)
    pub sub: String,
    /// Member's email address
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// JWT claims for refresh tokens.
///
/// The `jti` is recorded in the `auth_sessions` table when the token is
/// issued; sign-out deletes the row, which invalidates the token even
/// before its `exp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Member ID (subject claim)
    pub sub: String,
    /// Member's email address
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier (JWT ID), registered server-side
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip() {
        let claims = Claims {
            sub: "member-id-123".to_string(),
            email: "uye@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.sub, "member-id-123");
        assert_eq!(parsed.email, "uye@example.com");
    }

    #[test]
    fn test_refresh_claims_carry_jti() {
        let claims = RefreshTokenClaims {
            sub: "member-id-456".to_string(),
            email: "uye@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
            jti: "session-jti-1".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""jti":"session-jti-1""#));
    }
}

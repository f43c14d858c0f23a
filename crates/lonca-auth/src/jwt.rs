//! JWT creation and verification.
//!
//! Access tokens authenticate API requests; refresh tokens (registered by
//! `jti` in the `auth_sessions` table) mint new access tokens without a
//! fresh login. Both are signed with the shared secret from [`JwtConfig`].

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use lonca_config::JwtConfig;
use lonca_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims};

/// Creates a short-lived access token for the given member.
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g. invalid secret key).
pub fn create_access_token(
    member_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: member_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, the signature
/// is invalid, or the token has expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

/// Creates a long-lived refresh token with a fresh `jti`.
///
/// The caller is responsible for registering the `jti` server-side so the
/// token can be revoked on sign-out.
///
/// # Errors
///
/// Returns an error if token encoding fails.
pub fn create_refresh_token(
    member_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.refresh_token_expiry as usize;

    let claims = RefreshTokenClaims {
        sub: member_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

/// Verifies a refresh token and returns the claims.
///
/// Signature validity alone does not make the token usable: the `jti` must
/// still be registered in `auth_sessions`.
///
/// # Errors
///
/// Returns an unauthorized error if the token is invalid or expired.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let config = get_test_jwt_config();
        let member_id = Uuid::new_v4();

        let token = create_access_token(member_id, "uye@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, member_id.to_string());
        assert_eq!(claims.email, "uye@example.com");
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "uye@example.com", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..config
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let config = get_test_jwt_config();
        let member_id = Uuid::new_v4();

        let token = create_refresh_token(member_id, "uye@example.com", &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.sub, member_id.to_string());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_refresh_tokens_get_unique_jti() {
        let config = get_test_jwt_config();
        let member_id = Uuid::new_v4();

        let a = create_refresh_token(member_id, "uye@example.com", &config).unwrap();
        let b = create_refresh_token(member_id, "uye@example.com", &config).unwrap();

        let jti_a = verify_refresh_token(&a, &config).unwrap().jti;
        let jti_b = verify_refresh_token(&b, &config).unwrap().jti;
        assert_ne!(jti_a, jti_b);
    }

    #[test]
    fn test_refresh_expiry_longer_than_access() {
        let config = get_test_jwt_config();
        let member_id = Uuid::new_v4();

        let access = create_access_token(member_id, "uye@example.com", &config).unwrap();
        let refresh = create_refresh_token(member_id, "uye@example.com", &config).unwrap();

        let access_claims = verify_token(&access, &config).unwrap();
        let refresh_claims = verify_refresh_token(&refresh, &config).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }
}

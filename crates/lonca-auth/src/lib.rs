//! # Lonca Auth
//!
//! Authentication types and JWT utilities for the Lonca portal API.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`jwt`]: Token creation and verification utilities
//!
//! # Token Types
//!
//! - **Access Token** ([`Claims`]): Short-lived token carrying identity only
//!   (`sub`, `email`). Roles and permissions are deliberately *not* embedded:
//!   the effective permission set is recomputed from the live role-permission
//!   mapping on every session resolution, so matrix edits take effect without
//!   reissuing tokens.
//! - **Refresh Token** ([`RefreshTokenClaims`]): Long-lived token whose `jti`
//!   is registered server-side so sign-out can revoke it.
//!
//! # Example
//!
//! ```ignore
//! use lonca_auth::{create_access_token, verify_token};
//! use lonca_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(member_id, "uye@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};

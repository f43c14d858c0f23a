//! # Lonca Config
//!
//! Configuration types for the Lonca portal API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`guard`]: Route guard configuration (login path, redirect threshold)
//! - [`rate_limit`]: API rate limiting configuration
//!
//! # Example
//!
//! ```ignore
//! use lonca_config::{JwtConfig, CorsConfig, GuardConfig, RateLimitConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let guard_config = GuardConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod guard;
pub mod jwt;
pub mod rate_limit;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use guard::GuardConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;

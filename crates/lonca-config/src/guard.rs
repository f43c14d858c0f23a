//! Route guard configuration.
//!
//! The route guard protects admin dashboard regions and needs three pieces of
//! configuration: where the login entry point lives, how many soft redirects
//! to anonymous resolutions are tolerated before the guard assumes corrupted
//! client state and forces a hard reset, and an optional deadline for a
//! session resolution that never settles.
//!
//! `require_role` is a per-region choice rather than an environment setting:
//! regions that only need authentication opt out with
//! [`GuardConfig::with_require_role`].

use std::env;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    /// Path of the login entry point, used for soft redirects and hard resets.
    pub login_path: String,
    /// Number of soft redirects tolerated before a hard client-state reset.
    pub max_redirect_attempts: u32,
    /// Whether the guarded region requires at least one approved role.
    pub require_role: bool,
    /// Deadline for an in-flight session resolution. `None` preserves the
    /// wait-forever behavior; when set, a resolution that exceeds the deadline
    /// settles as unauthenticated so the redirect counter can break the hang.
    pub resolve_timeout: Option<Duration>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            max_redirect_attempts: 3,
            require_role: true,
            resolve_timeout: None,
        }
    }
}

impl GuardConfig {
    /// Creates a `GuardConfig` from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GUARD_LOGIN_PATH`: Default `/login`
    /// - `GUARD_MAX_REDIRECT_ATTEMPTS`: Default 3
    /// - `GUARD_RESOLVE_TIMEOUT_MS`: Unset by default (wait forever)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            login_path: env::var("GUARD_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            max_redirect_attempts: env::var("GUARD_MAX_REDIRECT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            require_role: true,
            resolve_timeout: env::var("GUARD_RESOLVE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
        }
    }

    /// Returns a copy of this config with the role-approval requirement
    /// switched on or off for one guarded region.
    #[must_use]
    pub fn with_require_role(mut self, require_role: bool) -> Self {
        self.require_role = require_role;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.max_redirect_attempts, 3);
        assert!(config.require_role);
        assert!(config.resolve_timeout.is_none());
    }

    #[test]
    fn test_with_require_role() {
        let config = GuardConfig::default().with_require_role(false);
        assert!(!config.require_role);
    }
}

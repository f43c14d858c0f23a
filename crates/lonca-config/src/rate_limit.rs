//! Rate limiting configuration.
//!
//! Token-bucket limits built on the Governor crate. Auth endpoints get a
//! stricter bucket than the rest of the API to slow down credential
//! stuffing against the login route.

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Token replenishment rate for general endpoints.
    pub general_per_second: u64,
    /// Maximum token accumulation for general endpoints.
    pub general_burst_size: u32,
    /// Token replenishment rate for auth endpoints.
    pub auth_per_second: u64,
    /// Maximum token accumulation for auth endpoints.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// Creates a `RateLimitConfig` from environment variables, falling back
    /// to the defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    ///
    /// - `RATE_LIMIT_GENERAL_PER_SECOND`: Default 2
    /// - `RATE_LIMIT_GENERAL_BURST_SIZE`: Default 30
    /// - `RATE_LIMIT_AUTH_PER_SECOND`: Default 10
    /// - `RATE_LIMIT_AUTH_BURST_SIZE`: Default 5
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: std::env::var("RATE_LIMIT_GENERAL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_per_second),
            general_burst_size: std::env::var("RATE_LIMIT_GENERAL_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_burst_size),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_burst_size),
        }
    }

    /// Governor config for general API endpoints, keyed by peer IP.
    ///
    /// # Panics
    ///
    /// Panics if the governor configuration cannot be built.
    #[allow(dead_code)]
    #[must_use]
    pub fn general_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.general_per_second)
            .burst_size(self.general_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build general rate limiter config")
    }

    /// Governor config for auth endpoints, keyed by peer IP.
    ///
    /// # Panics
    ///
    /// Panics if the governor configuration cannot be built.
    #[allow(dead_code)]
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_auth_bucket_is_stricter_burst() {
        let config = RateLimitConfig::default();
        assert!(config.auth_burst_size < config.general_burst_size);
    }
}

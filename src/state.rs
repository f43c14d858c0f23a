use sqlx::PgPool;

use crate::modules::roles::service::PermissionCache;
use lonca_config::cors::CorsConfig;
use lonca_config::jwt::JwtConfig;
use lonca_config::rate_limit::RateLimitConfig;
use lonca_db::init_db_pool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    /// Shared role → permission mapping. Loaded before the router serves
    /// traffic so permission checks are never evaluated against an unloaded
    /// mapping.
    pub permissions: PermissionCache,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;
    let permissions = PermissionCache::load(&db).await;

    AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        permissions,
    }
}

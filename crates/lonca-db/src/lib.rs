//! # Lonca DB
//!
//! Database pool initialization for the Lonca portal API.
//!
//! # Example
//!
//! ```ignore
//! use lonca_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     // Use pool for database operations
//! }
//! ```

use std::env;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The returned [`PgPool`] is cheaply cloneable; call this once during
/// startup and hand it to the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;

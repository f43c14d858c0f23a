//! # Lonca Core
//!
//! Core types, errors, and utilities for the Lonca portal API.
//!
//! This crate provides foundational types used throughout the Lonca application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Secure password hashing and verification
//! - [`permissions`]: The feature-area permission catalog and full-access roles
//!
//! # Example
//!
//! ```ignore
//! use lonca_core::errors::AppError;
//! use lonca_core::pagination::{PaginationParams, PaginationMeta};
//! use lonca_core::permissions;
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("Member not found"));
//!
//! // Check a catalog entry
//! assert!(permissions::CATALOG.contains(&permissions::EVENTS));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};

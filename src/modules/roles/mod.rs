//! Role-permission mapping module.
//!
//! Owns the two halves of the mapping's lifecycle: the loader/cache that
//! every session resolution reads from, and the administrative matrix
//! editor that replaces the stored mapping wholesale.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

//! Session resolution module.
//!
//! Answers the dashboard's bootstrap question: who is the current actor,
//! is their email confirmed, which approved roles do they hold, and what
//! is the derived effective permission set.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

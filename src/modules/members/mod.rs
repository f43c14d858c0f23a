//! Member administration: listing accounts and managing role assignments,
//! including the approval step that activates them.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

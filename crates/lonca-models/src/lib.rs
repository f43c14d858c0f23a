//! # Lonca Models
//!
//! Domain models for the Lonca portal API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed ID newtypes
//! - [`members`]: Member (account) entities
//! - [`roles`]: Role/permission keys, the role-permission mapping, display labels
//! - [`session`]: Session resolution types shared by the route guard and the
//!   server's request-path enforcement

pub mod ids;
pub mod members;
pub mod roles;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use ids::MemberId;
pub use members::Member;
pub use roles::{
    PermissionKey, RoleAssignment, RoleKey, RolePermissionMap, RolePermissionRow, display_name,
    normalize_key,
};
pub use session::{Resolution, ResolvedSession, SessionActor};

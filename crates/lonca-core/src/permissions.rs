//! Permission constants for the Lonca portal.
//!
//! Each permission names one feature area of the admin dashboard. The set is
//! open at the store boundary (permissions are plain strings in the
//! `role_permissions` table), but code that references a feature area should
//! use these constants instead of string literals.
//!
//! # Example
//!
//! ```ignore
//! use lonca_core::permissions;
//!
//! if session.has_permission(permissions::EVENTS) {
//!     // Show the events admin page
//! }
//! ```

/// Manage news posts
pub const NEWS: &str = "news";
/// Manage events and event registrations
pub const EVENTS: &str = "events";
/// Manage the magazine archive
pub const MAGAZINES: &str = "magazines";
/// Manage sponsor listings
pub const SPONSORS: &str = "sponsors";
/// Manage internship postings
pub const INTERNSHIPS: &str = "internships";
/// Manage surveys
pub const SURVEYS: &str = "surveys";
/// Manage the product showcase
pub const PRODUCTS: &str = "products";
/// Manage the team roster pages
pub const TEAM: &str = "team";
/// Manage shared documents
pub const DOCUMENTS: &str = "documents";
/// Manage member accounts and role approvals
pub const USERS: &str = "users";
/// Manage landing-page slides
pub const SLIDES: &str = "slides";
/// Manage portal settings
pub const SETTINGS: &str = "settings";

/// The full permission catalog, in display order.
pub const CATALOG: [&str; 12] = [
    NEWS,
    EVENTS,
    MAGAZINES,
    SPONSORS,
    INTERNSHIPS,
    SURVEYS,
    PRODUCTS,
    TEAM,
    DOCUMENTS,
    USERS,
    SLIDES,
    SETTINGS,
];

/// Roles allowed to edit the role-permission matrix. These two roles are also
/// the ones the loader's fallback mapping grants the full catalog, so a store
/// outage can never lock out the highest-privilege accounts.
pub const FULL_ACCESS_ROLES: [&str; 2] = ["baskan", "teknik_ekip"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for p in CATALOG {
            assert!(seen.insert(p), "duplicate catalog entry: {}", p);
        }
    }

    #[test]
    fn test_full_access_roles_are_fixed() {
        assert_eq!(FULL_ACCESS_ROLES, ["baskan", "teknik_ekip"]);
    }
}

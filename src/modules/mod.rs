pub mod auth;
pub mod members;
pub mod roles;
pub mod session;

//! Per-request identity plumbing

pub mod auth;

pub use auth::{check_owner, require_scope, RequestScope, Viewer};

//! Well-known role name constants.
//!
//! These are the values carried in the `role` claim of access tokens.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_STAFF: &str = "staff";

/// Roles allowed to create, edit and delete tenant configuration such as surveys.
pub fn can_manage(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

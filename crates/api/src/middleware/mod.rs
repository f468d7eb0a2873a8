//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::TenantUser`] -- Requires a user acting for a tenant.
//! - [`rbac::RequireManager`] -- Requires a tenant user with `manager` or `admin` role.

pub mod auth;
pub mod rbac;

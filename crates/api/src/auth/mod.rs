//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Tokens are issued by the platform's identity service; this server only
//! needs to verify them and read the tenant and role they carry.

pub mod jwt;

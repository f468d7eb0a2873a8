//! Domain types, constants and pure validation logic shared by every
//! Tourdesk crate. Nothing in here performs I/O.

pub mod api_paths;
pub mod error;
pub mod roles;
pub mod survey;
pub mod survey_invite;
pub mod types;

//! Language lookup rows (seeded by migrations).

use serde::Serialize;
use sqlx::FromRow;
use tourdesk_core::types::{DbId, Timestamp};

/// A row from the `languages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

//! Repository for the `languages` lookup table.

use sqlx::PgPool;
use tourdesk_core::types::DbId;

use crate::models::language::Language;

const COLUMNS: &str = "id, code, name, created_at, updated_at";

/// Read-only access to the seeded languages.
pub struct LanguageRepo;

impl LanguageRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE id = $1");
        sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a language by its ISO code (e.g. `"en"`).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE code = $1");
        sqlx::query_as::<_, Language>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `tenants` table.

use sqlx::PgPool;
use tourdesk_core::types::DbId;

use crate::models::tenant::{CreateTenant, Tenant};

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides lookups and inserts for tenants.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant. Fails with a `uq_tenants_slug` violation on a
    /// duplicate slug.
    pub async fn create(pool: &PgPool, input: &CreateTenant) -> Result<Tenant, sqlx::Error> {
        let query =
            format!("INSERT INTO tenants (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

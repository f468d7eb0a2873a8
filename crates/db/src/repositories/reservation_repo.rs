//! Repository for the `reservations` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tourdesk_core::types::DbId;

use crate::models::reservation::{CreateReservation, Reservation};
use crate::models::survey::Survey;

const COLUMNS: &str = "id, tenant_id, language_id, customer_name, customer_email, \
    start_date, end_date, created_at, updated_at";

/// Same columns, qualified with the `r` alias.
const R_COLUMNS: &str = "r.id, r.tenant_id, r.language_id, r.customer_name, r.customer_email, \
    r.start_date, r.end_date, r.created_at, r.updated_at";

/// Provides the reservation queries surveys need.
pub struct ReservationRepo;

impl ReservationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations \
                (tenant_id, language_id, customer_name, customer_email, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.tenant_id)
            .bind(input.language_id)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reservations of the survey's tenant that are due an invitation on `today`.
    ///
    /// A reservation is due once `end_date + send_after_days <= today`, it has
    /// a customer email, it ended on or after the day the survey was created,
    /// its language matches the survey's (when both are set) and no invitation
    /// has been recorded for it yet.
    pub async fn list_due_for_survey(
        pool: &PgPool,
        survey: &Survey,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS} FROM reservations r \
             WHERE r.tenant_id = $1 \
               AND r.customer_email IS NOT NULL \
               AND r.end_date + $2::int <= $3 \
               AND r.end_date >= $4 \
               AND ($5::bigint IS NULL OR r.language_id IS NULL OR r.language_id = $5) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM survey_invitations i \
                   WHERE i.survey_id = $6 AND i.reservation_id = r.id) \
             ORDER BY r.end_date, r.id \
             LIMIT $7"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(survey.tenant_id)
            .bind(survey.send_after_days)
            .bind(today)
            .bind(survey.created_at.date_naive())
            .bind(survey.language_id)
            .bind(survey.id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

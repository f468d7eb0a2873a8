//! Repository for the `survey_invitations` table.

use sqlx::PgPool;
use tourdesk_core::types::DbId;

use crate::models::survey_invitation::SurveyInvitation;

const COLUMNS: &str =
    "id, survey_id, reservation_id, email, sent_at, error, attempts, created_at";

/// Records auto-send attempts so every reservation gets at most one delivered
/// invitation per survey.
pub struct SurveyInvitationRepo;

impl SurveyInvitationRepo {
    /// Record an invitation for `(survey_id, reservation_id)`.
    ///
    /// Returns `None` if one was already recorded (another dispatcher got
    /// there first).
    pub async fn record(
        pool: &PgPool,
        survey_id: DbId,
        reservation_id: DbId,
        email: &str,
    ) -> Result<Option<SurveyInvitation>, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_invitations (survey_id, reservation_id, email) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_survey_invitations_survey_reservation DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyInvitation>(&query)
            .bind(survey_id)
            .bind(reservation_id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Failed, unsent invitations of a survey with fewer than `max_attempts`
    /// attempts, oldest first.
    pub async fn list_retryable(
        pool: &PgPool,
        survey_id: DbId,
        max_attempts: i32,
        limit: i64,
    ) -> Result<Vec<SurveyInvitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_invitations \
             WHERE survey_id = $1 AND sent_at IS NULL AND error IS NOT NULL \
               AND attempts < $2 \
             ORDER BY id \
             LIMIT $3"
        );
        sqlx::query_as::<_, SurveyInvitation>(&query)
            .bind(survey_id)
            .bind(max_attempts)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Claim a failed invitation for another attempt by bumping `attempts`.
    ///
    /// `seen_attempts` is the count read by [`Self::list_retryable`]; the
    /// claim only succeeds if nobody bumped it since. The last error stays in
    /// place until the attempt is marked sent or failed.
    pub async fn claim_retry(
        pool: &PgPool,
        id: DbId,
        seen_attempts: i32,
    ) -> Result<Option<SurveyInvitation>, sqlx::Error> {
        let query = format!(
            "UPDATE survey_invitations SET attempts = attempts + 1 \
             WHERE id = $1 AND attempts = $2 AND sent_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyInvitation>(&query)
            .bind(id)
            .bind(seen_attempts)
            .fetch_optional(pool)
            .await
    }

    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE survey_invitations SET sent_at = NOW(), error = NULL WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE survey_invitations SET error = $2 WHERE id = $1")
            .bind(id)
            .bind(error)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<SurveyInvitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_invitations WHERE survey_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SurveyInvitation>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }
}

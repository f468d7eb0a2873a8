//! Repository for the `survey_responses` table.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use tourdesk_core::types::DbId;

use crate::models::survey_response::{
    SubmitSurveyResponse, SurveyResponse, SurveyResponseWithQuestion,
};
use crate::repositories::SurveyQuestionRepo;

/// Column list for the `survey_responses` table.
const COLUMNS: &str = "id, survey_id, reservation_id, question_id, answer, answer_number, \
    answer_array, respondent_email, respondent_name, submitted_at";

/// Same columns, qualified with the `r` alias used in JOIN queries.
const R_COLUMNS: &str = "r.id, r.survey_id, r.reservation_id, r.question_id, r.answer, \
    r.answer_number, r.answer_array, r.respondent_email, r.respondent_name, r.submitted_at";

/// Provides insert and listing operations for survey responses.
pub struct SurveyResponseRepo;

impl SurveyResponseRepo {
    /// Store one row per answer of a submission.
    ///
    /// All rows share the same `submitted_at` timestamp and are written in a
    /// single transaction. Answer/question consistency is the caller's job.
    pub async fn create_batch(
        pool: &PgPool,
        survey_id: DbId,
        input: &SubmitSurveyResponse,
    ) -> Result<Vec<SurveyResponse>, sqlx::Error> {
        let submitted_at = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO survey_responses \
                (survey_id, reservation_id, question_id, answer, answer_number, answer_array, \
                 respondent_email, respondent_name, submitted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );

        let mut rows = Vec::with_capacity(input.answers.len());
        for answer in &input.answers {
            let row = sqlx::query_as::<_, SurveyResponse>(&query)
                .bind(survey_id)
                .bind(input.reservation_id)
                .bind(answer.question_id)
                .bind(&answer.answer)
                .bind(answer.answer_number)
                .bind(&answer.answer_array)
                .bind(&input.respondent_email)
                .bind(&input.respondent_name)
                .bind(submitted_at)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// List a survey's responses with their questions.
    ///
    /// Newest submissions first; answers within a submission follow the
    /// question order.
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<SurveyResponseWithQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS} FROM survey_responses r \
             LEFT JOIN survey_questions q ON q.id = r.question_id \
             WHERE r.survey_id = $1 \
             ORDER BY r.submitted_at DESC, q.sort_order ASC NULLS LAST, r.id ASC"
        );
        let responses = sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;
        Self::attach_questions(pool, responses).await
    }

    /// List every response given for a reservation, ordered by question
    /// sort order.
    pub async fn list_by_reservation(
        pool: &PgPool,
        reservation_id: DbId,
    ) -> Result<Vec<SurveyResponseWithQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS} FROM survey_responses r \
             LEFT JOIN survey_questions q ON q.id = r.question_id \
             WHERE r.reservation_id = $1 \
             ORDER BY q.sort_order ASC NULLS LAST, r.id ASC"
        );
        let responses = sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(reservation_id)
            .fetch_all(pool)
            .await?;
        Self::attach_questions(pool, responses).await
    }

    /// Count the stored response rows of a survey.
    pub async fn count_by_survey(pool: &PgPool, survey_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM survey_responses WHERE survey_id = $1")
                .bind(survey_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Load the questions referenced by `responses` in one query and pair them up.
    async fn attach_questions(
        pool: &PgPool,
        responses: Vec<SurveyResponse>,
    ) -> Result<Vec<SurveyResponseWithQuestion>, sqlx::Error> {
        let mut ids: Vec<DbId> = responses.iter().map(|r| r.question_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let questions: HashMap<DbId, _> = SurveyQuestionRepo::list_by_ids(pool, &ids)
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        Ok(responses
            .into_iter()
            .map(|response| {
                let question = questions.get(&response.question_id).cloned();
                SurveyResponseWithQuestion { response, question }
            })
            .collect())
    }
}

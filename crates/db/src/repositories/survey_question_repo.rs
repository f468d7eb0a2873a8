//! Repository for the `survey_questions` table.

use sqlx::PgPool;
use tourdesk_core::survey::{
    next_sort_order, normalize_options, QUESTION_CHECKBOX, QUESTION_RADIO,
};
use tourdesk_core::types::DbId;

use crate::models::survey_question::{
    CreateSurveyQuestion, SurveyQuestion, UpdateSurveyQuestion,
};

/// Column list for the `survey_questions` table.
pub(crate) const COLUMNS: &str = "id, survey_id, question_type, question_text, description, \
    options, is_required, sort_order, created_at, updated_at";

/// Provides CRUD operations for survey questions.
pub struct SurveyQuestionRepo;

impl SurveyQuestionRepo {
    /// List a survey's questions in display order (ties broken by insertion).
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<SurveyQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_questions \
             WHERE survey_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, SurveyQuestion>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch several questions by id, in no particular order.
    pub async fn list_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<SurveyQuestion>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM survey_questions WHERE id = ANY($1)");
        sqlx::query_as::<_, SurveyQuestion>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Find a question, scoped to its survey.
    pub async fn find_by_id(
        pool: &PgPool,
        survey_id: DbId,
        question_id: DbId,
    ) -> Result<Option<SurveyQuestion>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM survey_questions WHERE id = $1 AND survey_id = $2");
        sqlx::query_as::<_, SurveyQuestion>(&query)
            .bind(question_id)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a question to a survey.
    ///
    /// Without an explicit sort order the question lands after the current
    /// last one (`MAX(sort_order) + 1`, or `0` for an empty survey).
    pub async fn append(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateSurveyQuestion,
    ) -> Result<SurveyQuestion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sort_order = match input.sort_order {
            Some(explicit) => explicit,
            None => {
                let (current_max,): (Option<i32>,) = sqlx::query_as(
                    "SELECT MAX(sort_order) FROM survey_questions WHERE survey_id = $1",
                )
                .bind(survey_id)
                .fetch_one(&mut *tx)
                .await?;
                next_sort_order(current_max)
            }
        };

        let query = format!(
            "INSERT INTO survey_questions \
                (survey_id, question_type, question_text, description, options, \
                 is_required, sort_order) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), $7) \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, SurveyQuestion>(&query)
            .bind(survey_id)
            .bind(&input.question_type)
            .bind(&input.question_text)
            .bind(&input.description)
            .bind(normalize_options(&input.question_type, input.options.clone()))
            .bind(input.is_required)
            .bind(sort_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(question)
    }

    /// Update a question. Only non-`None` fields are applied.
    ///
    /// Options are cleared in the same statement when the resulting type is
    /// neither radio nor checkbox. Returns `None` if the question does not
    /// exist in this survey.
    pub async fn update(
        pool: &PgPool,
        survey_id: DbId,
        question_id: DbId,
        input: &UpdateSurveyQuestion,
    ) -> Result<Option<SurveyQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE survey_questions SET \
                question_type = COALESCE($3, question_type), \
                question_text = COALESCE($4, question_text), \
                description = CASE WHEN $5 THEN $6 ELSE description END, \
                options = CASE \
                    WHEN COALESCE($3, question_type) IN ('{QUESTION_RADIO}', '{QUESTION_CHECKBOX}') \
                    THEN COALESCE($7, options) \
                    ELSE NULL END, \
                is_required = COALESCE($8, is_required), \
                sort_order = COALESCE($9, sort_order) \
             WHERE id = $1 AND survey_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyQuestion>(&query)
            .bind(question_id)
            .bind(survey_id)
            .bind(&input.question_type)
            .bind(&input.question_text)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.options)
            .bind(input.is_required)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question from a survey.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        survey_id: DbId,
        question_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM survey_questions WHERE id = $1 AND survey_id = $2")
            .bind(question_id)
            .bind(survey_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

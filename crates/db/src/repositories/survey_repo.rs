//! Repository for the `surveys` table.

use sqlx::PgPool;
use tourdesk_core::survey::{
    initial_sort_orders, normalize_options, DEFAULT_SEND_AFTER_DAYS, STATUS_ACTIVE, STATUS_DRAFT,
};
use tourdesk_core::types::DbId;

use crate::models::survey::{CreateSurvey, Survey, SurveyWithRelations, UpdateSurvey};
use crate::repositories::{LanguageRepo, SurveyQuestionRepo};

/// Column list for the `surveys` table.
const COLUMNS: &str = "id, tenant_id, language_id, title, description, status, is_active, \
    auto_send, send_after_days, email_subject, email_template, created_at, updated_at";

/// Provides CRUD operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new survey for `tenant_id` together with its inline questions.
    ///
    /// Questions without an explicit sort order take their position in the
    /// input list. Everything is written in one transaction.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateSurvey,
    ) -> Result<Survey, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO surveys \
                (tenant_id, language_id, title, description, status, is_active, auto_send, \
                 send_after_days, email_subject, email_template) \
             VALUES ($1, $2, $3, $4, COALESCE($5, '{STATUS_DRAFT}'), COALESCE($6, true), \
                 COALESCE($7, false), COALESCE($8, {DEFAULT_SEND_AFTER_DAYS}), $9, $10) \
             RETURNING {COLUMNS}"
        );
        let survey = sqlx::query_as::<_, Survey>(&insert_query)
            .bind(tenant_id)
            .bind(input.language_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.is_active)
            .bind(input.auto_send)
            .bind(input.send_after_days)
            .bind(&input.email_subject)
            .bind(&input.email_template)
            .fetch_one(&mut *tx)
            .await?;

        let supplied: Vec<Option<i32>> = input.questions.iter().map(|q| q.sort_order).collect();
        let sort_orders = initial_sort_orders(&supplied);
        for (question, sort_order) in input.questions.iter().zip(sort_orders) {
            sqlx::query(
                "INSERT INTO survey_questions \
                    (survey_id, question_type, question_text, description, options, \
                     is_required, sort_order) \
                 VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), $7)",
            )
            .bind(survey.id)
            .bind(&question.question_type)
            .bind(&question.question_text)
            .bind(&question.description)
            .bind(normalize_options(
                &question.question_type,
                question.options.clone(),
            ))
            .bind(question.is_required)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(survey)
    }

    /// Find a survey by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a survey by ID, enriched with its ordered questions and language.
    pub async fn find_by_id_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SurveyWithRelations>, sqlx::Error> {
        let Some(survey) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let questions = SurveyQuestionRepo::list_by_survey(pool, survey.id).await?;
        let language = match survey.language_id {
            Some(language_id) => LanguageRepo::find_by_id(pool, language_id).await?,
            None => None,
        };
        Ok(Some(SurveyWithRelations {
            survey,
            questions,
            language,
        }))
    }

    /// List a tenant's surveys, newest first.
    pub async fn list_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Update a survey. Only non-`None` fields are applied.
    ///
    /// Nullable columns take `Some(None)` to clear the stored value; the
    /// query receives a "provided" flag plus the inner value for each.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSurvey,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!(
            "UPDATE surveys SET \
                language_id = CASE WHEN $2 THEN $3 ELSE language_id END, \
                title = COALESCE($4, title), \
                description = CASE WHEN $5 THEN $6 ELSE description END, \
                status = COALESCE($7, status), \
                is_active = COALESCE($8, is_active), \
                auto_send = COALESCE($9, auto_send), \
                send_after_days = COALESCE($10, send_after_days), \
                email_subject = CASE WHEN $11 THEN $12 ELSE email_subject END, \
                email_template = CASE WHEN $13 THEN $14 ELSE email_template END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(input.language_id.is_some())
            .bind(input.language_id.flatten())
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.status)
            .bind(input.is_active)
            .bind(input.auto_send)
            .bind(input.send_after_days)
            .bind(input.email_subject.is_some())
            .bind(input.email_subject.as_ref().and_then(|v| v.as_deref()))
            .bind(input.email_template.is_some())
            .bind(input.email_template.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a survey. Its questions go with it; responses stay behind.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM surveys WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All surveys currently eligible for automatic dispatch, across tenants.
    pub async fn list_auto_send_ready(pool: &PgPool) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys \
             WHERE auto_send = true AND is_active = true AND status = '{STATUS_ACTIVE}' \
             ORDER BY id"
        );
        sqlx::query_as::<_, Survey>(&query).fetch_all(pool).await
    }
}

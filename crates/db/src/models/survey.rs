//! Survey entity model and DTOs.
//!
//! A survey belongs to a tenant, optionally targets a language, and owns an
//! ordered list of questions (see [`super::survey_question`]). Responses
//! reference the survey but are not owned by it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourdesk_core::survey::{MAX_EMAIL_SUBJECT_LENGTH, MAX_SEND_AFTER_DAYS, MAX_TITLE_LENGTH};
use tourdesk_core::types::{DbId, Timestamp};
use validator::Validate;

use super::language::Language;
use super::nullable;
use super::survey_question::{CreateSurveyQuestion, SurveyQuestion};

/// A row from the `surveys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: DbId,
    pub tenant_id: DbId,
    pub language_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub is_active: bool,
    pub auto_send: bool,
    pub send_after_days: i32,
    pub email_subject: Option<String>,
    pub email_template: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A survey enriched with its questions (in display order) and language.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyWithRelations {
    #[serde(flatten)]
    pub survey: Survey,
    pub questions: Vec<SurveyQuestion>,
    pub language: Option<Language>,
}

/// DTO for creating a survey, optionally together with its questions.
///
/// The tenant comes from the caller's token, never from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurvey {
    pub language_id: Option<DbId>,
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub auto_send: Option<bool>,
    #[validate(range(min = 0, max = MAX_SEND_AFTER_DAYS))]
    pub send_after_days: Option<i32>,
    #[validate(length(max = MAX_EMAIL_SUBJECT_LENGTH))]
    pub email_subject: Option<String>,
    pub email_template: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<CreateSurveyQuestion>,
}

/// DTO for updating a survey. Only provided fields are overwritten.
///
/// `languageId`, `description`, `emailSubject` and `emailTemplate` may be
/// sent as `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurvey {
    #[serde(default, deserialize_with = "nullable")]
    pub language_id: Option<Option<DbId>>,
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub auto_send: Option<bool>,
    #[validate(range(min = 0, max = MAX_SEND_AFTER_DAYS))]
    pub send_after_days: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = MAX_EMAIL_SUBJECT_LENGTH))]
    pub email_subject: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email_template: Option<Option<String>>,
}

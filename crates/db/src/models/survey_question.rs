//! Survey question entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourdesk_core::survey::MAX_QUESTION_TEXT_LENGTH;
use tourdesk_core::types::{DbId, Timestamp};
use validator::Validate;

use super::nullable;

/// A row from the `survey_questions` table.
///
/// `options` is only meaningful for `radio` and `checkbox` questions.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub id: DbId,
    pub survey_id: DbId,
    #[serde(rename = "type")]
    pub question_type: String,
    pub question_text: String,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a question, either inline with a survey or appended later.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    #[validate(length(min = 1, max = MAX_QUESTION_TEXT_LENGTH))]
    pub question_text: String,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub is_required: Option<bool>,
    /// Explicit position; computed when omitted.
    pub sort_order: Option<i32>,
}

/// DTO for updating a question. Only provided fields are overwritten.
///
/// `description` may be sent as `null` to clear it. Options are dropped
/// whenever the resulting type is not `radio` or `checkbox`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyQuestion {
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    #[validate(length(min = 1, max = MAX_QUESTION_TEXT_LENGTH))]
    pub question_text: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub options: Option<Vec<String>>,
    pub is_required: Option<bool>,
    pub sort_order: Option<i32>,
}

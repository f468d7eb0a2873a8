//! Survey response entity model and DTOs.
//!
//! One row is stored per answered question. Exactly one of `answer`,
//! `answer_number` and `answer_array` is expected to be set, depending on the
//! question type.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourdesk_core::survey::MAX_RESPONDENT_NAME_LENGTH;
use tourdesk_core::types::{DbId, Timestamp};
use validator::Validate;

use super::survey_question::SurveyQuestion;

/// A row from the `survey_responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: DbId,
    pub survey_id: DbId,
    pub reservation_id: Option<DbId>,
    pub question_id: DbId,
    pub answer: Option<String>,
    pub answer_number: Option<i32>,
    pub answer_array: Option<Vec<String>>,
    pub respondent_email: Option<String>,
    pub respondent_name: Option<String>,
    pub submitted_at: Timestamp,
}

/// A response together with the question it answers.
///
/// `question` is `None` when the question has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponseWithQuestion {
    #[serde(flatten)]
    pub response: SurveyResponse,
    pub question: Option<SurveyQuestion>,
}

/// A single answer inside a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswerInput {
    pub question_id: DbId,
    pub answer: Option<String>,
    pub answer_number: Option<i32>,
    pub answer_array: Option<Vec<String>>,
}

/// DTO for submitting a respondent's answers to a survey.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyResponse {
    pub reservation_id: Option<DbId>,
    #[validate(email)]
    pub respondent_email: Option<String>,
    #[validate(length(max = MAX_RESPONDENT_NAME_LENGTH))]
    pub respondent_name: Option<String>,
    #[validate(length(min = 1))]
    pub answers: Vec<SurveyAnswerInput>,
}

//! Wire types exchanged with the API.
//!
//! Field names follow the server's camelCase JSON. Request types skip unset
//! fields so partial updates only send what changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourdesk_core::types::DbId;

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
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
}

/// A survey with its ordered questions and language.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurveyDetail {
    #[serde(flatten)]
    pub survey: Survey,
    pub questions: Vec<SurveyQuestion>,
    pub language: Option<Language>,
}

/// The respondent-facing view of an active survey.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSurvey {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<Language>,
    pub questions: Vec<SurveyQuestion>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSurveyQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSurvey {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_send: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_after_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<NewSurveyQuestion>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_send: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_after_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionChanges {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
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
    pub submitted_at: DateTime<Utc>,
    /// Present on listings; `None` once the question was deleted.
    #[serde(default)]
    pub question: Option<SurveyQuestion>,
}

/// One answer of a [`SurveySubmission`]. Set the field matching the
/// question type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_array: Option<Vec<String>>,
}

impl Answer {
    pub fn text(question_id: DbId, text: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn rating(question_id: DbId, value: i32) -> Self {
        Self {
            question_id,
            answer_number: Some(value),
            ..Self::default()
        }
    }

    pub fn choices(question_id: DbId, selected: Vec<String>) -> Self {
        Self {
            question_id,
            answer_array: Some(selected),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_name: Option<String>,
    pub answers: Vec<Answer>,
}

// ---------------------------------------------------------------------------
// Pricing insights
// ---------------------------------------------------------------------------

/// A pricing suggestion for one vehicle of a fleet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInsight {
    pub id: DbId,
    pub fleet_id: DbId,
    pub vehicle_id: DbId,
    pub insight_type: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub suggested_price: Option<f64>,
}

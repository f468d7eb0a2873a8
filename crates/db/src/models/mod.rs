//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Nullable columns use `Option<Option<T>>` in update DTOs: an absent field
//! keeps the stored value, an explicit `null` clears it.
//!
//! JSON field names are camelCase; columns stay snake_case.

use serde::{Deserialize, Deserializer};

pub mod language;
pub mod reservation;
pub mod survey;
pub mod survey_invitation;
pub mod survey_question;
pub mod survey_response;
pub mod tenant;

/// Deserialize a present field (including `null`) as `Some(..)`.
///
/// Pair with `#[serde(default)]` so a missing field stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::survey::UpdateSurvey;
    use super::survey_response::{SubmitSurveyResponse, SurveyAnswerInput};

    #[test]
    fn null_and_absent_fields_are_distinguished() {
        let update: UpdateSurvey =
            serde_json::from_str(r#"{ "description": null, "languageId": 4 }"#).unwrap();
        assert_eq!(update.description, Some(None));
        assert_eq!(update.language_id, Some(Some(4)));
        assert_eq!(update.email_template, None);
        assert_eq!(update.title, None);
    }

    #[test]
    fn submission_needs_at_least_one_answer() {
        let mut submission = SubmitSurveyResponse {
            reservation_id: None,
            respondent_email: None,
            respondent_name: None,
            answers: vec![],
        };
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("answers"));

        submission.answers.push(SurveyAnswerInput {
            question_id: 1,
            answer: None,
            answer_number: Some(8),
            answer_array: None,
        });
        assert!(submission.validate().is_ok());
    }
}

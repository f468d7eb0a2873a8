//! Survey constants and validation functions.
//!
//! Statuses and question types are stored as TEXT columns guarded by CHECK
//! constraints; the constants here must match those constraints.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a survey title.
pub const MAX_TITLE_LENGTH: u64 = 255;

/// Maximum length of an invitation email subject.
pub const MAX_EMAIL_SUBJECT_LENGTH: u64 = 255;

/// Maximum length of a question text.
pub const MAX_QUESTION_TEXT_LENGTH: u64 = 1_000;

/// Maximum length of a respondent's name.
pub const MAX_RESPONDENT_NAME_LENGTH: u64 = 255;

/// Maximum number of options on a radio / checkbox question.
pub const MAX_OPTIONS: usize = 50;

/// Upper bound for `send_after_days`.
pub const MAX_SEND_AFTER_DAYS: i32 = 365;

/// Default delay between reservation end and survey dispatch.
pub const DEFAULT_SEND_AFTER_DAYS: i32 = 1;

/// Inclusive bounds of a rating answer.
pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 10;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// All valid survey statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_ACTIVE, STATUS_INACTIVE];

// ---------------------------------------------------------------------------
// Question types
// ---------------------------------------------------------------------------

pub const QUESTION_TEXT: &str = "text";
pub const QUESTION_TEXTAREA: &str = "textarea";
pub const QUESTION_RADIO: &str = "radio";
pub const QUESTION_CHECKBOX: &str = "checkbox";
pub const QUESTION_RATING: &str = "rating";
pub const QUESTION_YESNO: &str = "yesno";

/// All valid question types.
pub const VALID_QUESTION_TYPES: &[&str] = &[
    QUESTION_TEXT,
    QUESTION_TEXTAREA,
    QUESTION_RADIO,
    QUESTION_CHECKBOX,
    QUESTION_RATING,
    QUESTION_YESNO,
];

/// Accepted answers for a `yesno` question.
pub const YESNO_VALUES: &[&str] = &["yes", "no"];

/// Whether a question type carries a list of options.
pub fn uses_options(question_type: &str) -> bool {
    question_type == QUESTION_RADIO || question_type == QUESTION_CHECKBOX
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that the status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid survey status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

/// Validate that the question type is one of the accepted values.
pub fn validate_question_type(question_type: &str) -> Result<(), String> {
    if VALID_QUESTION_TYPES.contains(&question_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid question type '{question_type}'. Must be one of: {}",
            VALID_QUESTION_TYPES.join(", ")
        ))
    }
}

/// Validate a question's option list against its type.
///
/// Radio and checkbox questions need at least one non-blank option with no
/// duplicates. Other types accept any value; the options are dropped by
/// [`normalize_options`].
pub fn validate_options(question_type: &str, options: Option<&[String]>) -> Result<(), String> {
    if !uses_options(question_type) {
        return Ok(());
    }
    let options = options.unwrap_or_default();
    if options.is_empty() {
        return Err(format!(
            "Question type '{question_type}' requires at least one option"
        ));
    }
    if options.len() > MAX_OPTIONS {
        return Err(format!("A question may have at most {MAX_OPTIONS} options"));
    }
    for (i, option) in options.iter().enumerate() {
        if option.trim().is_empty() {
            return Err(format!("Option {i} must not be blank"));
        }
        if options[..i].contains(option) {
            return Err(format!("Duplicate option '{option}'"));
        }
    }
    Ok(())
}

/// Keep options only where the question type uses them.
pub fn normalize_options(question_type: &str, options: Option<Vec<String>>) -> Option<Vec<String>> {
    if uses_options(question_type) {
        options
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Sort order for a question appended after the existing ones.
///
/// `current_max` is `MAX(sort_order)` over the survey's questions, `None`
/// when the survey has none yet.
pub fn next_sort_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

/// Sort orders for questions created together with their survey: the
/// supplied value when present, otherwise the question's position.
pub fn initial_sort_orders(supplied: &[Option<i32>]) -> Vec<i32> {
    supplied
        .iter()
        .enumerate()
        .map(|(index, explicit)| explicit.unwrap_or(index as i32))
        .collect()
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// The three answer shapes a response row can carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerParts<'a> {
    pub text: Option<&'a str>,
    pub number: Option<i32>,
    pub array: Option<&'a [String]>,
}

impl AnswerParts<'_> {
    /// Whether any answer shape holds a non-empty value.
    pub fn is_answered(&self) -> bool {
        self.text.is_some_and(|t| !t.trim().is_empty())
            || self.number.is_some()
            || self.array.is_some_and(|a| !a.is_empty())
    }
}

/// Validate that an answer uses the shape its question type expects.
///
/// - `text`, `textarea`, `radio`, `yesno` answer with `answer`
/// - `rating` answers with `answer_number` within [`RATING_MIN`]..=[`RATING_MAX`]
/// - `checkbox` answers with `answer_array`
///
/// Unanswered input is accepted here; required-ness is checked by the caller.
pub fn validate_answer(
    question_type: &str,
    options: Option<&[String]>,
    answer: &AnswerParts<'_>,
) -> Result<(), String> {
    match question_type {
        QUESTION_RATING => {
            if answer.text.is_some() || answer.array.is_some() {
                return Err("Rating questions take a numeric answer".to_string());
            }
            if let Some(n) = answer.number {
                if !(RATING_MIN..=RATING_MAX).contains(&n) {
                    return Err(format!(
                        "Rating must be between {RATING_MIN} and {RATING_MAX}, got {n}"
                    ));
                }
            }
            Ok(())
        }
        QUESTION_CHECKBOX => {
            if answer.text.is_some() || answer.number.is_some() {
                return Err("Checkbox questions take a list of answers".to_string());
            }
            if let (Some(selected), Some(options)) = (answer.array, options) {
                if let Some(unknown) = selected.iter().find(|s| !options.contains(s)) {
                    return Err(format!("'{unknown}' is not one of the question's options"));
                }
            }
            Ok(())
        }
        QUESTION_TEXT | QUESTION_TEXTAREA | QUESTION_RADIO | QUESTION_YESNO => {
            if answer.number.is_some() || answer.array.is_some() {
                return Err(format!(
                    "Questions of type '{question_type}' take a text answer"
                ));
            }
            let Some(text) = answer.text else {
                return Ok(());
            };
            if question_type == QUESTION_YESNO && !YESNO_VALUES.contains(&text) {
                return Err(format!("Answer must be 'yes' or 'no', got '{text}'"));
            }
            if question_type == QUESTION_RADIO {
                if let Some(options) = options {
                    if !options.iter().any(|o| o == text) {
                        return Err(format!("'{text}' is not one of the question's options"));
                    }
                }
            }
            Ok(())
        }
        other => Err(format!("Unknown question type '{other}'")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn status_validation() {
        assert!(validate_status("draft").is_ok());
        assert!(validate_status("active").is_ok());
        assert!(validate_status("inactive").is_ok());
        let err = validate_status("archived").unwrap_err();
        assert!(err.contains("draft, active, inactive"));
    }

    #[test]
    fn question_type_validation() {
        for t in VALID_QUESTION_TYPES {
            assert!(validate_question_type(t).is_ok());
        }
        assert!(validate_question_type("slider").is_err());
    }

    #[test]
    fn choice_questions_need_options() {
        assert!(validate_options(QUESTION_RADIO, None).is_err());
        assert!(validate_options(QUESTION_CHECKBOX, Some(&[])).is_err());
        assert!(validate_options(QUESTION_RADIO, Some(&opts(&["A", "B"]))).is_ok());
        assert!(validate_options(QUESTION_RADIO, Some(&opts(&["A", " "]))).is_err());
        assert!(validate_options(QUESTION_CHECKBOX, Some(&opts(&["A", "A"]))).is_err());
        // Options are irrelevant for free-text questions.
        assert!(validate_options(QUESTION_TEXT, None).is_ok());
    }

    #[test]
    fn options_dropped_for_non_choice_types() {
        assert_eq!(normalize_options(QUESTION_TEXT, Some(opts(&["A"]))), None);
        assert_eq!(
            normalize_options(QUESTION_CHECKBOX, Some(opts(&["A"]))),
            Some(opts(&["A"]))
        );
    }

    #[test]
    fn next_sort_order_follows_max() {
        assert_eq!(next_sort_order(None), 0);
        assert_eq!(next_sort_order(Some(2)), 3);
        assert_eq!(next_sort_order(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn initial_sort_orders_default_to_index() {
        assert_eq!(initial_sort_orders(&[None, None, None]), vec![0, 1, 2]);
        assert_eq!(initial_sort_orders(&[Some(10), None, Some(5)]), vec![10, 1, 5]);
        assert!(initial_sort_orders(&[]).is_empty());
    }

    #[test]
    fn rating_answers() {
        let ok = AnswerParts {
            number: Some(4),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_RATING, None, &ok).is_ok());

        let out_of_range = AnswerParts {
            number: Some(11),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_RATING, None, &out_of_range).is_err());

        let text = AnswerParts {
            text: Some("great"),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_RATING, None, &text).is_err());
    }

    #[test]
    fn checkbox_answers_must_be_known_options() {
        let options = opts(&["Pool", "Beach", "Spa"]);
        let picked = opts(&["Pool", "Spa"]);
        let ok = AnswerParts {
            array: Some(&picked),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_CHECKBOX, Some(&options), &ok).is_ok());

        let unknown = opts(&["Gym"]);
        let bad = AnswerParts {
            array: Some(&unknown),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_CHECKBOX, Some(&options), &bad).is_err());
    }

    #[test]
    fn text_shaped_answers() {
        let yes = AnswerParts {
            text: Some("yes"),
            ..Default::default()
        };
        let maybe = AnswerParts {
            text: Some("maybe"),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_YESNO, None, &yes).is_ok());
        assert!(validate_answer(QUESTION_YESNO, None, &maybe).is_err());

        let options = opts(&["Car", "Van"]);
        let car = AnswerParts {
            text: Some("Car"),
            ..Default::default()
        };
        let bike = AnswerParts {
            text: Some("Bike"),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_RADIO, Some(&options), &car).is_ok());
        assert!(validate_answer(QUESTION_RADIO, Some(&options), &bike).is_err());

        let number = AnswerParts {
            number: Some(3),
            ..Default::default()
        };
        assert!(validate_answer(QUESTION_TEXTAREA, None, &number).is_err());
    }

    #[test]
    fn is_answered_ignores_blank_values() {
        assert!(!AnswerParts::default().is_answered());
        let blank = AnswerParts {
            text: Some("   "),
            ..Default::default()
        };
        assert!(!blank.is_answered());
        let empty: Vec<String> = vec![];
        let none_picked = AnswerParts {
            array: Some(&empty),
            ..Default::default()
        };
        assert!(!none_picked.is_answered());
        let rated = AnswerParts {
            number: Some(1),
            ..Default::default()
        };
        assert!(rated.is_answered());
    }
}

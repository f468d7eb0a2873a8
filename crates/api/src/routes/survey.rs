use axum::routing::{get, post, put};
use axum::Router;
use tourdesk_core::api_paths;

use crate::handlers::{survey, survey_response};
use crate::state::AppState;

/// Survey management and response routes, merged into `/api/v1`.
///
/// ```text
/// GET, POST          /surveys
/// GET, PUT, DELETE   /surveys/{id}
/// POST               /surveys/{id}/questions
/// PUT, DELETE        /surveys/{id}/questions/{question_id}
/// GET, POST          /surveys/{id}/responses
/// GET                /surveys/reservations/{reservation_id}/responses
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            api_paths::SURVEYS,
            get(survey::list_surveys).post(survey::create_survey),
        )
        .route(
            api_paths::SURVEY_BY_ID,
            get(survey::get_survey)
                .put(survey::update_survey)
                .delete(survey::delete_survey),
        )
        .route(
            api_paths::SURVEY_QUESTIONS,
            post(survey::add_question),
        )
        .route(
            api_paths::SURVEY_QUESTION_BY_ID,
            put(survey::update_question).delete(survey::delete_question),
        )
        .route(
            api_paths::SURVEY_RESPONSES,
            get(survey_response::list_survey_responses).post(survey_response::submit_response),
        )
        .route(
            api_paths::RESERVATION_SURVEY_RESPONSES,
            get(survey_response::list_reservation_responses),
        )
}

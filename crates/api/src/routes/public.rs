use axum::routing::get;
use axum::Router;
use tourdesk_core::api_paths;

use crate::handlers::survey_response;
use crate::state::AppState;

/// Unauthenticated routes used by survey respondents.
pub fn router() -> Router<AppState> {
    Router::new().route(
        api_paths::PUBLIC_SURVEY,
        get(survey_response::get_public_survey),
    )
}

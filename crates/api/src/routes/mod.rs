pub mod health;
pub mod public;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /surveys                                          list, create
/// /surveys/{id}                                     get, update, delete
/// /surveys/{id}/questions                           add question (POST)
/// /surveys/{id}/questions/{question_id}             update, delete question
/// /surveys/{id}/responses                           list (GET), submit (POST, public)
/// /surveys/reservations/{reservation_id}/responses  responses of a reservation (GET)
///
/// /public/surveys/{id}                              public survey form (GET, public)
/// ```
///
/// Path templates come from [`tourdesk_core::api_paths`] so the client and
/// the server share one source of truth.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(survey::router())
        .merge(public::router())
}

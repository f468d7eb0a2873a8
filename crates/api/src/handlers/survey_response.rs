//! Handlers for survey responses and the public survey form.
//!
//! Submitting and reading the public form require no authentication; the
//! respondent reaches them through the link in the invitation email.
//! Listing responses is restricted to users of the owning tenant.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tourdesk_core::error::CoreError;
use tourdesk_core::survey::{validate_answer, AnswerParts, STATUS_ACTIVE};
use tourdesk_core::types::DbId;
use tourdesk_db::models::language::Language;
use tourdesk_db::models::survey::Survey;
use tourdesk_db::models::survey_question::SurveyQuestion;
use tourdesk_db::models::survey_response::SubmitSurveyResponse;
use tourdesk_db::repositories::{
    ReservationRepo, SurveyQuestionRepo, SurveyRepo, SurveyResponseRepo,
};
use validator::Validate;

use super::survey::find_tenant_survey;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::TenantUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The parts of a survey a respondent gets to see.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSurveyView {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<Language>,
    pub questions: Vec<SurveyQuestion>,
}

fn accepts_responses(survey: &Survey) -> bool {
    survey.is_active && survey.status == STATUS_ACTIVE
}

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/public/surveys/{id}
///
/// The form of an active survey. Drafts and inactive surveys are not found.
pub async fn get_public_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let survey = SurveyRepo::find_by_id_with_relations(&state.pool, survey_id)
        .await?
        .filter(|s| accepts_responses(&s.survey))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    Ok(Json(DataResponse {
        data: PublicSurveyView {
            id: survey.survey.id,
            title: survey.survey.title,
            description: survey.survey.description,
            language: survey.language,
            questions: survey.questions,
        },
    }))
}

/// POST /api/v1/surveys/{id}/responses
///
/// Store a respondent's answers, one row per question, all stamped with the
/// same submission time.
pub async fn submit_response(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<SubmitSurveyResponse>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let survey = SurveyRepo::find_by_id(&state.pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;
    if !accepts_responses(&survey) {
        return Err(AppError::BadRequest(
            "Survey is not accepting responses".into(),
        ));
    }

    if let Some(reservation_id) = input.reservation_id {
        let reservation = ReservationRepo::find_by_id(&state.pool, reservation_id).await?;
        if !matches!(reservation, Some(r) if r.tenant_id == survey.tenant_id) {
            return Err(AppError::BadRequest(format!(
                "Reservation {reservation_id} does not belong to this survey's tenant"
            )));
        }
    }

    let questions: HashMap<DbId, SurveyQuestion> =
        SurveyQuestionRepo::list_by_survey(&state.pool, survey_id)
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

    let mut answered = HashSet::with_capacity(input.answers.len());
    for answer in &input.answers {
        let question = questions.get(&answer.question_id).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Question {} does not belong to survey {survey_id}",
                answer.question_id
            ))
        })?;
        if !answered.insert(answer.question_id) {
            return Err(AppError::BadRequest(format!(
                "Question {} answered more than once",
                answer.question_id
            )));
        }

        let parts = AnswerParts {
            text: answer.answer.as_deref(),
            number: answer.answer_number,
            array: answer.answer_array.as_deref(),
        };
        validate_answer(&question.question_type, question.options.as_deref(), &parts)
            .map_err(CoreError::Validation)?;
        if question.is_required && !parts.is_answered() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Question {} is required",
                question.id
            ))));
        }
    }

    if let Some(missing) = questions
        .values()
        .filter(|q| q.is_required && !answered.contains(&q.id))
        .map(|q| q.id)
        .min()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Question {missing} is required"
        ))));
    }

    let rows = SurveyResponseRepo::create_batch(&state.pool, survey_id, &input).await?;

    tracing::info!(
        survey_id,
        reservation_id = input.reservation_id,
        answers = rows.len(),
        "Survey response submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rows })))
}

// ---------------------------------------------------------------------------
// Tenant endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/surveys/{id}/responses
///
/// All responses of a survey with their questions, newest submission first.
pub async fn list_survey_responses(
    user: TenantUser,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;
    let responses = SurveyResponseRepo::list_by_survey(&state.pool, survey_id).await?;
    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/surveys/reservations/{reservation_id}/responses
///
/// Every answer given for a reservation, in question order.
pub async fn list_reservation_responses(
    user: TenantUser,
    State(state): State<AppState>,
    Path(reservation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReservationRepo::find_by_id(&state.pool, reservation_id)
        .await?
        .filter(|r| r.tenant_id == user.tenant_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id: reservation_id,
        }))?;
    let responses = SurveyResponseRepo::list_by_reservation(&state.pool, reservation_id).await?;
    Ok(Json(DataResponse { data: responses }))
}

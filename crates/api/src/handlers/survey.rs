//! Handlers for survey and survey-question management.
//!
//! Reads require a tenant user; writes require a tenant manager. A survey
//! owned by another tenant is reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;
use tourdesk_core::error::CoreError;
use tourdesk_core::survey::{
    normalize_options, validate_options, validate_question_type, validate_status,
};
use tourdesk_core::types::DbId;
use tourdesk_db::models::survey::{CreateSurvey, Survey, SurveyWithRelations, UpdateSurvey};
use tourdesk_db::models::survey_question::{CreateSurveyQuestion, UpdateSurveyQuestion};
use tourdesk_db::repositories::{SurveyQuestionRepo, SurveyRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManager, TenantUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a survey owned by `tenant_id`, or fail with 404.
pub(crate) async fn find_tenant_survey(
    pool: &PgPool,
    tenant_id: DbId,
    survey_id: DbId,
) -> AppResult<Survey> {
    SurveyRepo::find_by_id(pool, survey_id)
        .await?
        .filter(|s| s.tenant_id == tenant_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))
}

async fn load_with_relations(pool: &PgPool, survey_id: DbId) -> AppResult<SurveyWithRelations> {
    SurveyRepo::find_by_id_with_relations(pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))
}

fn validate_new_question(input: &CreateSurveyQuestion) -> Result<(), CoreError> {
    validate_question_type(&input.question_type).map_err(CoreError::Validation)?;
    validate_options(&input.question_type, input.options.as_deref())
        .map_err(CoreError::Validation)
}

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

/// GET /api/v1/surveys
///
/// List the caller's tenant surveys, newest first.
pub async fn list_surveys(
    user: TenantUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let surveys = SurveyRepo::list_by_tenant(&state.pool, user.tenant_id).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// GET /api/v1/surveys/{id}
///
/// A survey with its ordered questions and language.
pub async fn get_survey(
    user: TenantUser,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;
    let survey = load_with_relations(&state.pool, survey_id).await?;
    Ok(Json(DataResponse { data: survey }))
}

/// POST /api/v1/surveys
///
/// Create a survey, optionally with its questions, for the caller's tenant.
pub async fn create_survey(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CreateSurvey>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(status) = &input.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }
    for question in &input.questions {
        validate_new_question(question)?;
    }

    let survey = SurveyRepo::create(&state.pool, user.tenant_id, &input).await?;
    let created = load_with_relations(&state.pool, survey.id).await?;

    tracing::info!(
        survey_id = survey.id,
        tenant_id = user.tenant_id,
        user_id = user.user_id,
        questions = created.questions.len(),
        "Survey created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/surveys/{id}
///
/// Overwrite the provided survey fields.
pub async fn update_survey(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<UpdateSurvey>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(status) = &input.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;

    SurveyRepo::update(&state.pool, survey_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;
    let survey = load_with_relations(&state.pool, survey_id).await?;

    tracing::info!(survey_id, user_id = user.user_id, "Survey updated");

    Ok(Json(DataResponse { data: survey }))
}

/// DELETE /api/v1/surveys/{id}
///
/// Delete a survey and its questions. Submitted responses are kept.
pub async fn delete_survey(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;

    if !SurveyRepo::delete(&state.pool, survey_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }));
    }

    tracing::info!(survey_id, user_id = user.user_id, "Survey deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// POST /api/v1/surveys/{id}/questions
///
/// Append a question. Without an explicit `sortOrder` it goes last.
pub async fn add_question(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(input): Json<CreateSurveyQuestion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_new_question(&input)?;
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;

    let question = SurveyQuestionRepo::append(&state.pool, survey_id, &input).await?;

    tracing::info!(
        survey_id,
        question_id = question.id,
        sort_order = question.sort_order,
        "Survey question added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/v1/surveys/{id}/questions/{question_id}
///
/// Update a question. Changing to a type without options clears them.
pub async fn update_question(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path((survey_id, question_id)): Path<(DbId, DbId)>,
    Json(mut input): Json<UpdateSurveyQuestion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "SurveyQuestion",
            id: question_id,
        })
    };
    let existing = SurveyQuestionRepo::find_by_id(&state.pool, survey_id, question_id)
        .await?
        .ok_or_else(not_found)?;

    let effective_type = input
        .question_type
        .clone()
        .unwrap_or_else(|| existing.question_type.clone());
    validate_question_type(&effective_type).map_err(CoreError::Validation)?;
    let effective_options = input.options.as_deref().or(existing.options.as_deref());
    validate_options(&effective_type, effective_options).map_err(CoreError::Validation)?;
    input.options = normalize_options(&effective_type, input.options.take());

    let question = SurveyQuestionRepo::update(&state.pool, survey_id, question_id, &input)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(survey_id, question_id, user_id = user.user_id, "Survey question updated");

    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/v1/surveys/{id}/questions/{question_id}
pub async fn delete_question(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path((survey_id, question_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    find_tenant_survey(&state.pool, user.tenant_id, survey_id).await?;

    if !SurveyQuestionRepo::delete(&state.pool, survey_id, question_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SurveyQuestion",
            id: question_id,
        }));
    }

    tracing::info!(survey_id, question_id, user_id = user.user_id, "Survey question deleted");

    Ok(StatusCode::NO_CONTENT)
}

//! Survey endpoints.

use tourdesk_core::api_paths;
use tourdesk_core::types::DbId;

use crate::client::{ApiClient, ClientError};
use crate::models::{
    NewSurvey, NewSurveyQuestion, PublicSurvey, QuestionChanges, Survey, SurveyChanges,
    SurveyDetail, SurveyQuestion, SurveyResponse, SurveySubmission,
};

impl ApiClient {
    pub async fn list_surveys(&self) -> Result<Vec<Survey>, ClientError> {
        self.get(api_paths::SURVEYS).await
    }

    pub async fn get_survey(&self, id: DbId) -> Result<SurveyDetail, ClientError> {
        self.get(&api_paths::survey_by_id(id)).await
    }

    pub async fn create_survey(&self, input: &NewSurvey) -> Result<SurveyDetail, ClientError> {
        self.post(api_paths::SURVEYS, input).await
    }

    pub async fn update_survey(
        &self,
        id: DbId,
        changes: &SurveyChanges,
    ) -> Result<SurveyDetail, ClientError> {
        self.put(&api_paths::survey_by_id(id), changes).await
    }

    pub async fn delete_survey(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&api_paths::survey_by_id(id)).await
    }

    pub async fn add_question(
        &self,
        survey_id: DbId,
        input: &NewSurveyQuestion,
    ) -> Result<SurveyQuestion, ClientError> {
        self.post(&api_paths::survey_questions(survey_id), input)
            .await
    }

    pub async fn update_question(
        &self,
        survey_id: DbId,
        question_id: DbId,
        changes: &QuestionChanges,
    ) -> Result<SurveyQuestion, ClientError> {
        self.put(
            &api_paths::survey_question_by_id(survey_id, question_id),
            changes,
        )
        .await
    }

    pub async fn delete_question(
        &self,
        survey_id: DbId,
        question_id: DbId,
    ) -> Result<(), ClientError> {
        self.delete(&api_paths::survey_question_by_id(survey_id, question_id))
            .await
    }

    /// Submit a respondent's answers. Works without a token.
    pub async fn submit_response(
        &self,
        survey_id: DbId,
        submission: &SurveySubmission,
    ) -> Result<Vec<SurveyResponse>, ClientError> {
        self.post(&api_paths::survey_responses(survey_id), submission)
            .await
    }

    pub async fn list_survey_responses(
        &self,
        survey_id: DbId,
    ) -> Result<Vec<SurveyResponse>, ClientError> {
        self.get(&api_paths::survey_responses(survey_id)).await
    }

    pub async fn list_reservation_responses(
        &self,
        reservation_id: DbId,
    ) -> Result<Vec<SurveyResponse>, ClientError> {
        self.get(&api_paths::reservation_survey_responses(reservation_id))
            .await
    }

    pub async fn get_public_survey(&self, id: DbId) -> Result<PublicSurvey, ClientError> {
        self.get(&api_paths::public_survey(id)).await
    }
}

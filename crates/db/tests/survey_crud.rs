//! Integration tests for the survey repositories.
//!
//! Exercises the repository layer against a real database:
//! - Survey create with inline questions and sort order assignment
//! - Question append (computed sort order) / update / delete
//! - Cascade behaviour: questions go with the survey, responses stay
//! - Response batches, timestamps and listing order
//! - Tenant scoping of survey listings

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tourdesk_db::models::reservation::CreateReservation;
use tourdesk_db::models::survey::{CreateSurvey, UpdateSurvey};
use tourdesk_db::models::survey_question::{CreateSurveyQuestion, UpdateSurveyQuestion};
use tourdesk_db::models::survey_response::{SubmitSurveyResponse, SurveyAnswerInput};
use tourdesk_db::models::tenant::CreateTenant;
use tourdesk_db::repositories::{
    LanguageRepo, ReservationRepo, SurveyQuestionRepo, SurveyRepo, SurveyResponseRepo,
    TenantRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_tenant(pool: &PgPool, slug: &str) -> i64 {
    TenantRepo::create(
        pool,
        &CreateTenant {
            name: format!("Tenant {slug}"),
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn question(question_type: &str, text: &str, sort_order: Option<i32>) -> CreateSurveyQuestion {
    CreateSurveyQuestion {
        question_type: question_type.to_string(),
        question_text: text.to_string(),
        description: None,
        options: None,
        is_required: None,
        sort_order,
    }
}

fn new_survey(title: &str, questions: Vec<CreateSurveyQuestion>) -> CreateSurvey {
    CreateSurvey {
        language_id: None,
        title: title.to_string(),
        description: None,
        status: None,
        is_active: None,
        auto_send: None,
        send_after_days: None,
        email_subject: None,
        email_template: None,
        questions,
    }
}

fn answer(question_id: i64, text: &str) -> SurveyAnswerInput {
    SurveyAnswerInput {
        question_id,
        answer: Some(text.to_string()),
        answer_number: None,
        answer_array: None,
    }
}

async fn new_reservation(pool: &PgPool, tenant_id: i64) -> i64 {
    ReservationRepo::create(
        pool,
        &CreateReservation {
            tenant_id,
            language_id: None,
            customer_name: "Ana Lima".to_string(),
            customer_email: Some("ana@example.test".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Test: create with questions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_survey_with_questions(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let input = new_survey(
        "Rental feedback",
        vec![
            question("text", "What did you rent?", None),
            question("rating", "Rate the vehicle", None),
            question("yesno", "Would you rent again?", None),
        ],
    );

    let survey = SurveyRepo::create(&pool, tenant_id, &input).await.unwrap();
    assert_eq!(survey.tenant_id, tenant_id);
    assert_eq!(survey.status, "draft"); // default
    assert!(survey.is_active);
    assert!(!survey.auto_send);
    assert_eq!(survey.send_after_days, 1);

    let loaded = SurveyRepo::find_by_id_with_relations(&pool, survey.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.questions.len(), 3);
    for (index, q) in loaded.questions.iter().enumerate() {
        assert_eq!(q.survey_id, survey.id);
        assert_eq!(q.sort_order, index as i32);
    }
    assert_eq!(loaded.questions[1].question_type, "rating");
    assert!(loaded.language.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_sort_orders_are_kept(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let input = new_survey(
        "Ordered",
        vec![
            question("text", "Last", Some(20)),
            question("text", "First", Some(5)),
        ],
    );
    let survey = SurveyRepo::create(&pool, tenant_id, &input).await.unwrap();

    let questions = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();
    assert_eq!(questions[0].question_text, "First");
    assert_eq!(questions[0].sort_order, 5);
    assert_eq!(questions[1].sort_order, 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_options_only_kept_for_choice_questions(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let mut radio = question("radio", "Vehicle class", None);
    radio.options = Some(vec!["Car".to_string(), "Van".to_string()]);
    let mut text = question("text", "Comments", None);
    text.options = Some(vec!["ignored".to_string()]);

    let survey = SurveyRepo::create(&pool, tenant_id, &new_survey("Options", vec![radio, text]))
        .await
        .unwrap();
    let questions = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();
    assert_eq!(
        questions[0].options,
        Some(vec!["Car".to_string(), "Van".to_string()])
    );
    assert_eq!(questions[1].options, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_language_is_loaded(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let spanish = LanguageRepo::find_by_code(&pool, "es").await.unwrap().unwrap();
    let mut input = new_survey("Encuesta", vec![]);
    input.language_id = Some(spanish.id);

    let survey = SurveyRepo::create(&pool, tenant_id, &input).await.unwrap();
    let loaded = SurveyRepo::find_by_id_with_relations(&pool, survey.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.language.unwrap().code, "es");
}

// ---------------------------------------------------------------------------
// Test: listing and updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_tenant_newest_first(pool: PgPool) {
    let acme = new_tenant(&pool, "acme").await;
    let other = new_tenant(&pool, "other").await;

    let first = SurveyRepo::create(&pool, acme, &new_survey("First", vec![]))
        .await
        .unwrap();
    let second = SurveyRepo::create(&pool, acme, &new_survey("Second", vec![]))
        .await
        .unwrap();
    SurveyRepo::create(&pool, other, &new_survey("Foreign", vec![]))
        .await
        .unwrap();

    let list = SurveyRepo::list_by_tenant(&pool, acme).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, second.id);
    assert_eq!(list[1].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let mut input = new_survey("Before", vec![]);
    input.description = Some("Keep me".to_string());
    let survey = SurveyRepo::create(&pool, tenant_id, &input).await.unwrap();

    let update = UpdateSurvey {
        title: Some("After".to_string()),
        status: Some("active".to_string()),
        auto_send: Some(true),
        send_after_days: Some(3),
        ..Default::default()
    };
    let updated = SurveyRepo::update(&pool, survey.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.status, "active");
    assert!(updated.auto_send);
    assert_eq!(updated.send_after_days, 3);
    assert_eq!(updated.description.as_deref(), Some("Keep me"));

    let missing = SurveyRepo::update(&pool, 999_999, &update).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_nullable_fields(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let spanish = LanguageRepo::find_by_code(&pool, "es").await.unwrap().unwrap();
    let mut input = new_survey("Encuesta", vec![]);
    input.language_id = Some(spanish.id);
    input.description = Some("Old".to_string());
    input.email_subject = Some("Subject".to_string());
    let survey = SurveyRepo::create(&pool, tenant_id, &input).await.unwrap();

    let update = UpdateSurvey {
        language_id: Some(None),
        description: Some(None),
        ..Default::default()
    };
    let updated = SurveyRepo::update(&pool, survey.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.language_id, None);
    assert_eq!(updated.description, None);
    assert_eq!(updated.email_subject.as_deref(), Some("Subject"));

    let update = UpdateSurvey {
        description: Some(Some("New".to_string())),
        ..Default::default()
    };
    let updated = SurveyRepo::update(&pool, survey.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("New"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_status_rejected_by_database(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let mut input = new_survey("Bad", vec![]);
    input.status = Some("archived".to_string());
    let result = SurveyRepo::create(&pool, tenant_id, &input).await;
    assert!(result.is_err(), "CHECK constraint must reject unknown status");
}

// ---------------------------------------------------------------------------
// Test: questions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_question_uses_max_plus_one(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let survey = SurveyRepo::create(
        &pool,
        tenant_id,
        &new_survey("Append", vec![question("text", "Existing", Some(2))]),
    )
    .await
    .unwrap();

    let appended = SurveyQuestionRepo::append(&pool, survey.id, &question("text", "New", None))
        .await
        .unwrap();
    assert_eq!(appended.sort_order, 3);
    assert_eq!(appended.survey_id, survey.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_to_empty_survey_starts_at_zero(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let survey = SurveyRepo::create(&pool, tenant_id, &new_survey("Empty", vec![]))
        .await
        .unwrap();
    let appended = SurveyQuestionRepo::append(&pool, survey.id, &question("text", "Q", None))
        .await
        .unwrap();
    assert_eq!(appended.sort_order, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_question_type_change_drops_options_in_one_update(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let mut radio = question("radio", "Vehicle class", None);
    radio.options = Some(vec!["Car".to_string(), "Van".to_string()]);
    let survey = SurveyRepo::create(&pool, tenant_id, &new_survey("Switch", vec![radio]))
        .await
        .unwrap();
    let q = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap()
        .remove(0);

    // Updating the text alone keeps the options of a choice question.
    let kept = SurveyQuestionRepo::update(
        &pool,
        survey.id,
        q.id,
        &UpdateSurveyQuestion {
            question_text: Some("Vehicle type".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(kept.options, Some(vec!["Car".to_string(), "Van".to_string()]));

    let switched = SurveyQuestionRepo::update(
        &pool,
        survey.id,
        q.id,
        &UpdateSurveyQuestion {
            question_type: Some("text".to_string()),
            description: Some(Some("Free text now".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(switched.question_type, "text");
    assert_eq!(switched.options, None);
    assert_eq!(switched.description.as_deref(), Some("Free text now"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_question(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let survey = SurveyRepo::create(
        &pool,
        tenant_id,
        &new_survey("Edit", vec![question("text", "Original", None)]),
    )
    .await
    .unwrap();
    let q = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap()
        .remove(0);

    let updated = SurveyQuestionRepo::update(
        &pool,
        survey.id,
        q.id,
        &UpdateSurveyQuestion {
            question_text: Some("Edited".to_string()),
            is_required: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.question_text, "Edited");
    assert!(updated.is_required);

    // Scoped to the survey: a wrong survey id finds nothing.
    assert!(!SurveyQuestionRepo::delete(&pool, survey.id + 1, q.id)
        .await
        .unwrap());
    assert!(SurveyQuestionRepo::delete(&pool, survey.id, q.id)
        .await
        .unwrap());
    assert!(SurveyQuestionRepo::find_by_id(&pool, survey.id, q.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: responses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_stamps_submitted_at(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let survey = SurveyRepo::create(
        &pool,
        tenant_id,
        &new_survey(
            "Stamp",
            vec![question("text", "A", None), question("text", "B", None)],
        ),
    )
    .await
    .unwrap();
    let questions = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();

    let before = Utc::now();
    let rows = SurveyResponseRepo::create_batch(
        &pool,
        survey.id,
        &SubmitSurveyResponse {
            reservation_id: None,
            respondent_email: Some("ana@example.test".to_string()),
            respondent_name: Some("Ana".to_string()),
            answers: vec![answer(questions[0].id, "x"), answer(questions[1].id, "y")],
        },
    )
    .await
    .unwrap();
    let after = Utc::now();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].submitted_at, rows[1].submitted_at);
    // Postgres stores microseconds; allow for truncation.
    let stamped = rows[0].submitted_at;
    assert!(stamped >= before - chrono::Duration::milliseconds(1));
    assert!(stamped <= after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_survey_cascades_questions_but_keeps_responses(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let survey = SurveyRepo::create(
        &pool,
        tenant_id,
        &new_survey("Cascade", vec![question("text", "Q", None)]),
    )
    .await
    .unwrap();
    let q = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap()
        .remove(0);
    SurveyResponseRepo::create_batch(
        &pool,
        survey.id,
        &SubmitSurveyResponse {
            reservation_id: None,
            respondent_email: None,
            respondent_name: None,
            answers: vec![answer(q.id, "kept")],
        },
    )
    .await
    .unwrap();

    assert!(SurveyRepo::delete(&pool, survey.id).await.unwrap());
    assert!(!SurveyRepo::delete(&pool, survey.id).await.unwrap());

    let questions = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();
    assert!(questions.is_empty());

    assert_eq!(
        SurveyResponseRepo::count_by_survey(&pool, survey.id)
            .await
            .unwrap(),
        1
    );
    let orphans = SurveyResponseRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);
    assert!(orphans[0].question.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_reservation_orders_by_question_sort_order(pool: PgPool) {
    let tenant_id = new_tenant(&pool, "acme").await;
    let reservation_id = new_reservation(&pool, tenant_id).await;
    let survey = SurveyRepo::create(
        &pool,
        tenant_id,
        &new_survey(
            "Order",
            vec![
                question("text", "Third", Some(30)),
                question("text", "First", Some(10)),
                question("text", "Second", Some(20)),
            ],
        ),
    )
    .await
    .unwrap();
    let questions = SurveyQuestionRepo::list_by_survey(&pool, survey.id)
        .await
        .unwrap();
    let by_text = |t: &str| questions.iter().find(|q| q.question_text == t).unwrap().id;

    // Submitted deliberately out of order.
    SurveyResponseRepo::create_batch(
        &pool,
        survey.id,
        &SubmitSurveyResponse {
            reservation_id: Some(reservation_id),
            respondent_email: None,
            respondent_name: None,
            answers: vec![
                answer(by_text("Third"), "c"),
                answer(by_text("First"), "a"),
                answer(by_text("Second"), "b"),
            ],
        },
    )
    .await
    .unwrap();

    let listed = SurveyResponseRepo::list_by_reservation(&pool, reservation_id)
        .await
        .unwrap();
    let answers: Vec<_> = listed
        .iter()
        .map(|r| r.response.answer.clone().unwrap())
        .collect();
    assert_eq!(answers, vec!["a", "b", "c"]);
    assert!(listed.iter().all(|r| r.question.is_some()));
}

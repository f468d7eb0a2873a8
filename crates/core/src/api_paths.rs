//! Central registry of HTTP route paths.
//!
//! Templates use axum's `{param}` syntax and are relative to [`API_PREFIX`]
//! (except [`HEALTH`], which is mounted at the root). The server mounts the
//! templates directly; clients build concrete paths with the helper
//! functions so both sides stay in step.

use crate::types::DbId;

/// Prefix under which every versioned endpoint is nested.
pub const API_PREFIX: &str = "/api/v1";

/// Liveness / database health probe (root level).
pub const HEALTH: &str = "/health";

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

pub const SURVEYS: &str = "/surveys";
pub const SURVEY_BY_ID: &str = "/surveys/{id}";
pub const SURVEY_QUESTIONS: &str = "/surveys/{id}/questions";
pub const SURVEY_QUESTION_BY_ID: &str = "/surveys/{id}/questions/{question_id}";
pub const SURVEY_RESPONSES: &str = "/surveys/{id}/responses";
pub const RESERVATION_SURVEY_RESPONSES: &str = "/surveys/reservations/{reservation_id}/responses";
pub const PUBLIC_SURVEY: &str = "/public/surveys/{id}";
pub const PRICING_INSIGHTS: &str = "/fleets/{fleet_id}/pricing-insights";

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One named endpoint in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Logical name used by callers that resolve endpoints by name.
    pub name: &'static str,
    /// Upper-case HTTP method.
    pub method: &'static str,
    /// Path template relative to [`API_PREFIX`].
    pub template: &'static str,
}

const fn entry(name: &'static str, method: &'static str, template: &'static str) -> RouteEntry {
    RouteEntry {
        name,
        method,
        template,
    }
}

/// Every endpoint known to the platform, keyed by logical name.
pub const ROUTES: &[RouteEntry] = &[
    entry("surveys.list", "GET", SURVEYS),
    entry("surveys.create", "POST", SURVEYS),
    entry("surveys.get", "GET", SURVEY_BY_ID),
    entry("surveys.update", "PUT", SURVEY_BY_ID),
    entry("surveys.delete", "DELETE", SURVEY_BY_ID),
    entry("surveys.questions.add", "POST", SURVEY_QUESTIONS),
    entry("surveys.questions.update", "PUT", SURVEY_QUESTION_BY_ID),
    entry("surveys.questions.delete", "DELETE", SURVEY_QUESTION_BY_ID),
    entry("surveys.responses.submit", "POST", SURVEY_RESPONSES),
    entry("surveys.responses.list", "GET", SURVEY_RESPONSES),
    entry(
        "surveys.responses.by_reservation",
        "GET",
        RESERVATION_SURVEY_RESPONSES,
    ),
    entry("public.surveys.get", "GET", PUBLIC_SURVEY),
    entry("pricing_insights.list", "GET", PRICING_INSIGHTS),
];

/// Look up a registry entry by logical name.
pub fn lookup(name: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Substitute `{param}` placeholders in a template.
///
/// Placeholders without a matching parameter are left untouched.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    let mut path = template.to_string();
    for (key, value) in params {
        path = path.replace(&format!("{{{key}}}"), value);
    }
    path
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn survey_by_id(id: DbId) -> String {
    fill(SURVEY_BY_ID, &[("id", &id.to_string())])
}

pub fn survey_questions(id: DbId) -> String {
    fill(SURVEY_QUESTIONS, &[("id", &id.to_string())])
}

pub fn survey_question_by_id(id: DbId, question_id: DbId) -> String {
    fill(
        SURVEY_QUESTION_BY_ID,
        &[("id", &id.to_string()), ("question_id", &question_id.to_string())],
    )
}

pub fn survey_responses(id: DbId) -> String {
    fill(SURVEY_RESPONSES, &[("id", &id.to_string())])
}

pub fn reservation_survey_responses(reservation_id: DbId) -> String {
    fill(
        RESERVATION_SURVEY_RESPONSES,
        &[("reservation_id", &reservation_id.to_string())],
    )
}

pub fn public_survey(id: DbId) -> String {
    fill(PUBLIC_SURVEY, &[("id", &id.to_string())])
}

pub fn pricing_insights(fleet_id: DbId) -> String {
    fill(PRICING_INSIGHTS, &[("fleet_id", &fleet_id.to_string())])
}

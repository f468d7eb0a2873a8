//! Auto-send invitation log rows.

use serde::Serialize;
use sqlx::FromRow;
use tourdesk_core::types::{DbId, Timestamp};

/// A row from the `survey_invitations` table.
///
/// `sent_at` is set once the email went out; `error` holds the last delivery
/// failure. `attempts` counts delivery attempts, including the first.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyInvitation {
    pub id: DbId,
    pub survey_id: DbId,
    pub reservation_id: DbId,
    pub email: String,
    pub sent_at: Option<Timestamp>,
    pub error: Option<String>,
    pub attempts: i32,
    pub created_at: Timestamp,
}

//! Reservation entity model and DTOs.
//!
//! Only the columns surveys depend on are modelled here: who the customer is,
//! how to reach them and when the rental ends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourdesk_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: DbId,
    pub tenant_id: DbId,
    pub language_id: Option<DbId>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new reservation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub tenant_id: DbId,
    pub language_id: Option<DbId>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

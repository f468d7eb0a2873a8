//! Automatic survey invitations.
//!
//! On a fixed interval, every active auto-send survey is matched against its
//! tenant's finished reservations. Each reservation whose end date plus the
//! survey's delay has passed gets one invitation email. Failed deliveries are
//! retried on later passes, up to [`MAX_SEND_ATTEMPTS`] attempts in total.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tourdesk_core::survey_invite::{render_invite, survey_link, InviteContext};
use tourdesk_db::models::reservation::Reservation;
use tourdesk_db::models::survey::Survey;
use tourdesk_db::models::survey_invitation::SurveyInvitation;
use tourdesk_db::repositories::{ReservationRepo, SurveyInvitationRepo, SurveyRepo};

use crate::mail::InviteSender;

/// Maximum reservations handled per survey in one pass.
const BATCH_SIZE: i64 = 200;

/// Delivery attempts per invitation before it is left as failed.
pub const MAX_SEND_ATTEMPTS: i32 = 5;

/// Outcome counters of one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Run the dispatcher loop until `cancel` is triggered.
pub async fn run<S: InviteSender>(
    pool: PgPool,
    sender: Arc<S>,
    public_base_url: String,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Survey dispatcher started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Survey dispatcher stopping");
                break;
            }
            _ = ticker.tick() => {
                let today = Utc::now().date_naive();
                let summary = dispatch_due(&pool, sender.as_ref(), &public_base_url, today).await;
                if summary.sent > 0 || summary.failed > 0 {
                    tracing::info!(
                        sent = summary.sent,
                        failed = summary.failed,
                        "Survey dispatch pass finished"
                    );
                } else {
                    tracing::debug!("Survey dispatch: nothing due");
                }
            }
        }
    }
}

/// Send every invitation due on `today`.
///
/// Errors are logged and counted; a failing survey never stops the others.
pub async fn dispatch_due<S: InviteSender>(
    pool: &PgPool,
    sender: &S,
    public_base_url: &str,
    today: NaiveDate,
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    let surveys = match SurveyRepo::list_auto_send_ready(pool).await {
        Ok(surveys) => surveys,
        Err(e) => {
            tracing::error!(error = %e, "Survey dispatch: failed to load surveys");
            return summary;
        }
    };

    for survey in &surveys {
        let result =
            dispatch_survey(pool, sender, public_base_url, survey, today, &mut summary).await;
        if let Err(e) = result {
            tracing::error!(survey_id = survey.id, error = %e, "Survey dispatch: survey skipped");
        }
    }

    summary
}

async fn dispatch_survey<S: InviteSender>(
    pool: &PgPool,
    sender: &S,
    public_base_url: &str,
    survey: &Survey,
    today: NaiveDate,
    summary: &mut DispatchSummary,
) -> Result<(), sqlx::Error> {
    let retryable =
        SurveyInvitationRepo::list_retryable(pool, survey.id, MAX_SEND_ATTEMPTS, BATCH_SIZE)
            .await?;
    for failed in retryable {
        let Some(invitation) =
            SurveyInvitationRepo::claim_retry(pool, failed.id, failed.attempts).await?
        else {
            continue;
        };
        let Some(reservation) = ReservationRepo::find_by_id(pool, invitation.reservation_id).await?
        else {
            continue;
        };
        deliver(pool, sender, public_base_url, survey, &reservation, &invitation, summary).await?;
    }

    let due = ReservationRepo::list_due_for_survey(pool, survey, today, BATCH_SIZE).await?;
    for reservation in due {
        let Some(email) = reservation.customer_email.as_deref() else {
            continue;
        };
        // Another instance may have claimed this reservation meanwhile.
        let Some(invitation) =
            SurveyInvitationRepo::record(pool, survey.id, reservation.id, email).await?
        else {
            continue;
        };
        deliver(pool, sender, public_base_url, survey, &reservation, &invitation, summary).await?;
    }

    Ok(())
}

/// Render and send one invitation, then record the outcome on its log row.
async fn deliver<S: InviteSender>(
    pool: &PgPool,
    sender: &S,
    public_base_url: &str,
    survey: &Survey,
    reservation: &Reservation,
    invitation: &SurveyInvitation,
    summary: &mut DispatchSummary,
) -> Result<(), sqlx::Error> {
    let link = survey_link(public_base_url, survey.id, reservation.id);
    let invite = render_invite(
        survey.email_subject.as_deref(),
        survey.email_template.as_deref(),
        &InviteContext {
            customer_name: &reservation.customer_name,
            survey_title: &survey.title,
            survey_link: &link,
        },
    );

    match sender.send_invite(&invitation.email, &invite).await {
        Ok(()) => {
            SurveyInvitationRepo::mark_sent(pool, invitation.id).await?;
            summary.sent += 1;
            tracing::info!(
                survey_id = survey.id,
                reservation_id = reservation.id,
                attempt = invitation.attempts,
                "Survey invitation sent"
            );
        }
        Err(e) => {
            SurveyInvitationRepo::mark_failed(pool, invitation.id, &e.to_string()).await?;
            summary.failed += 1;
            tracing::warn!(
                survey_id = survey.id,
                reservation_id = reservation.id,
                attempt = invitation.attempts,
                error = %e,
                "Survey invitation failed"
            );
        }
    }

    Ok(())
}

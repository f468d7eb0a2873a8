//! Rendering of auto-send survey invitation emails.
//!
//! Survey authors can supply their own subject and body. Both may reference
//! the placeholders below; unknown placeholders are left as written.

use crate::types::DbId;

pub const PLACEHOLDER_CUSTOMER_NAME: &str = "{{customerName}}";
pub const PLACEHOLDER_SURVEY_TITLE: &str = "{{surveyTitle}}";
pub const PLACEHOLDER_SURVEY_LINK: &str = "{{surveyLink}}";

/// Subject used when the survey does not define one.
pub const DEFAULT_SUBJECT: &str = "How was your trip? {{surveyTitle}}";

/// Body used when the survey does not define a template.
pub const DEFAULT_TEMPLATE: &str = "Hi {{customerName}},\n\n\
Thank you for travelling with us. We would love to hear about your experience.\n\
Please take a minute to answer our survey \"{{surveyTitle}}\":\n\n\
{{surveyLink}}\n";

/// Values substituted into an invitation.
#[derive(Debug, Clone)]
pub struct InviteContext<'a> {
    pub customer_name: &'a str,
    pub survey_title: &'a str,
    pub survey_link: &'a str,
}

/// A rendered invitation ready to hand to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvite {
    pub subject: String,
    pub body: String,
}

/// Build the public link a respondent follows to answer a survey.
///
/// `base_url` is the public survey page (trailing slashes are ignored).
pub fn survey_link(base_url: &str, survey_id: DbId, reservation_id: DbId) -> String {
    format!(
        "{}/{survey_id}?reservationId={reservation_id}",
        base_url.trim_end_matches('/')
    )
}

/// Render subject and body, falling back to the defaults for blank input.
pub fn render_invite(
    subject: Option<&str>,
    template: Option<&str>,
    ctx: &InviteContext<'_>,
) -> RenderedInvite {
    let subject = subject
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SUBJECT);
    let template = template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TEMPLATE);
    RenderedInvite {
        subject: substitute(subject, ctx),
        body: substitute(template, ctx),
    }
}

/// Replace placeholders in one pass; substituted values are never rescanned.
fn substitute(text: &str, ctx: &InviteContext<'_>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = [
            (PLACEHOLDER_CUSTOMER_NAME, ctx.customer_name),
            (PLACEHOLDER_SURVEY_TITLE, ctx.survey_title),
            (PLACEHOLDER_SURVEY_LINK, ctx.survey_link),
        ]
        .into_iter()
        .find(|(placeholder, _)| tail.starts_with(placeholder));
        match value {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

//! Submission notification emails.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, warn};

use crate::config::SmtpConfig;
use crate::models::submission::{InterestSubmission, SpeakerSubmission, SponsorSubmission};
use crate::utils::error::AppError;

/// Sends form-submission notifications to the configured recipient. Built
/// without SMTP settings it drops every message with a debug log, so the
/// intake endpoints work unchanged in environments without a mail account.
pub struct Notifier {
    config: Option<SmtpConfig>,
}

impl Notifier {
    pub fn new(config: Option<SmtpConfig>) -> Self {
        if config.is_none() {
            debug!("SMTP settings absent, notification emails disabled");
        }
        Self { config }
    }

    pub async fn notify_speaker_submission(&self, submission: &SpeakerSubmission) {
        let subject = format!("New speaker application: {}", submission.talk_title);
        let body = format!(
            "<h2>New speaker application</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Organization:</strong> {}</p>\
             <p><strong>Talk:</strong> {}</p>\
             <p><strong>Description:</strong></p><p>{}</p>",
            submission.full_name,
            submission.email,
            submission.organization,
            submission.talk_title,
            submission.talk_description,
        );
        self.send(&subject, body).await;
    }

    pub async fn notify_sponsor_submission(&self, submission: &SponsorSubmission) {
        let subject = format!("New sponsorship enquiry from {}", submission.company);
        let body = format!(
            "<h2>New sponsorship enquiry</h2>\
             <p><strong>Contact:</strong> {} ({})</p>\
             <p><strong>Company:</strong> {}</p>\
             <p><strong>Phone:</strong> {}</p>\
             <p><strong>Package:</strong> {}</p>\
             <p><strong>Message:</strong></p><p>{}</p>",
            submission.name,
            submission.email,
            submission.company,
            submission.phone,
            submission.package,
            submission.message.as_deref().unwrap_or("-"),
        );
        self.send(&subject, body).await;
    }

    pub async fn notify_interest_submission(&self, submission: &InterestSubmission) {
        let subject = format!("New volunteer interest: {}", submission.name);
        let body = format!(
            "<h2>New interest submission</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Phone:</strong> {}</p>\
             <p><strong>Area:</strong> {}</p>",
            submission.name, submission.email, submission.phone, submission.interest,
        );
        self.send(&subject, body).await;
    }

    /// Best-effort: callers run this inside `tokio::spawn` and failures only
    /// ever reach the log.
    async fn send(&self, subject: &str, html_body: String) {
        let Some(config) = &self.config else {
            debug!(subject, "Notification skipped, SMTP disabled");
            return;
        };
        if let Err(e) = deliver(config, subject, html_body).await {
            warn!(error = %e, subject, "Failed to send notification email");
        }
    }
}

async fn deliver(config: &SmtpConfig, subject: &str, html_body: String) -> Result<(), AppError> {
    let email = Message::builder()
        .from(
            config
                .from_address
                .parse()
                .map_err(|e| AppError::ExternalServiceError(format!("Invalid from address: {e}")))?,
        )
        .to(config
            .notify_to
            .parse()
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid recipient address: {e}")))?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body)
        .map_err(|e| AppError::ExternalServiceError(format!("Failed to build email: {e}")))?;

    // One transport per message; nothing is pooled across sends.
    let mailer = SmtpTransport::relay(&config.host)
        .map_err(|e| AppError::ExternalServiceError(format!("SMTP relay error: {e}")))?
        .port(config.port)
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build();

    tokio::task::spawn_blocking(move || mailer.send(&email))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Email task failed: {e}")))?
        .map_err(|e| AppError::ExternalServiceError(format!("Failed to send email: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::submission::InterestArea;

    #[tokio::test]
    async fn disabled_notifier_drops_messages_quietly() {
        let notifier = Notifier::new(None);
        let submission = InterestSubmission {
            id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            interest: InterestArea::Volunteer,
            phone: "0123456789".to_string(),
            submitted_at: Utc::now(),
        };
        notifier.notify_interest_submission(&submission).await;
    }
}

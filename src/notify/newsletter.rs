//! MailerLite newsletter subscriptions.

use reqwest::StatusCode;

use crate::config::NewsletterConfig;
use crate::utils::error::AppError;

const API_KEY_HEADER: &str = "X-MailerLite-ApiKey";

pub struct NewsletterClient {
    http: reqwest::Client,
    config: Option<NewsletterConfig>,
}

impl NewsletterClient {
    pub fn new(config: Option<NewsletterConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Adds the email to the configured group, refusing addresses that are
    /// already subscribed.
    pub async fn subscribe(&self, email: &str) -> Result<(), AppError> {
        let Some(config) = &self.config else {
            return Err(AppError::ExternalServiceError(
                "Newsletter service is not configured".to_string(),
            ));
        };

        let check_url = subscriber_lookup_url(&config.base_url, email);
        let response = self
            .http
            .get(&check_url)
            .header(API_KEY_HEADER, &config.api_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Subscriber lookup failed: {e}")))?;

        match response.status() {
            StatusCode::OK => {
                return Err(AppError::Conflict("This email is already subscribed.".to_string()));
            }
            StatusCode::NOT_FOUND => {}
            status => {
                return Err(AppError::ExternalServiceError(format!(
                    "Subscriber lookup returned {status}"
                )));
            }
        }

        let subscribe_url = format!("{}/groups/{}/subscribers", config.base_url, config.group_id);
        let response = self
            .http
            .post(&subscribe_url)
            .header(API_KEY_HEADER, &config.api_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Subscribe request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Subscribe request returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

// The address becomes a path segment, so reserved characters like `#`
// and `?` must be escaped or the lookup hits the wrong resource.
fn subscriber_lookup_url(base_url: &str, email: &str) -> String {
    format!("{}/subscribers/{}", base_url, urlencoding::encode(email))
}

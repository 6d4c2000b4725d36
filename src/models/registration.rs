use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::event::EventSummary;
use crate::utils::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Legal moves: pending -> confirmed, pending -> cancelled,
    /// confirmed -> cancelled. Cancellation is terminal.
    pub fn can_transition_to(self, next: RegistrationStatus) -> bool {
        use RegistrationStatus::{Cancelled, Confirmed, Pending};
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_url: Option<String>,
    pub linkedin_url: String,
    pub portfolio_url: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user listing shape: the registration row joined with a summary of
/// its event.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationWithEvent {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_url: Option<String>,
    pub linkedin_url: String,
    pub portfolio_url: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event: EventSummary,
}

// Flat row for the join; the event columns arrive aliased `event_*`.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithEventRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_url: Option<String>,
    pub linkedin_url: String,
    pub portfolio_url: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub event_location: String,
}

impl From<RegistrationWithEventRow> for RegistrationWithEvent {
    fn from(row: RegistrationWithEventRow) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            github_url: row.github_url,
            linkedin_url: row.linkedin_url,
            portfolio_url: row.portfolio_url,
            status: row.status,
            registered_at: row.registered_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            event: EventSummary {
                id: row.event_id,
                title: row.event_title,
                date: row.event_date,
                time: row.event_time,
                location: row.event_location,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_url: Option<String>,
    pub linkedin_url: String,
    pub portfolio_url: Option<String>,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if !validate::is_valid_email(self.email.trim()) {
            errors.push("Please enter a valid email address".to_string());
        }
        if !validate::is_ten_digit_phone(self.phone.trim()) {
            errors.push("Please enter a valid 10-digit phone number".to_string());
        }
        if let Some(github) = self.github_url.as_deref() {
            if !github.trim().is_empty() && !validate::is_github_url(github.trim()) {
                errors.push("Please enter a valid GitHub profile URL".to_string());
            }
        }
        let linkedin = self.linkedin_url.trim();
        if linkedin.is_empty() {
            errors.push("LinkedIn profile URL is required".to_string());
        } else if !validate::is_linkedin_url(linkedin) {
            errors.push("Please enter a valid LinkedIn profile URL".to_string());
        }
        if let Some(portfolio) = self.portfolio_url.as_deref() {
            if !portfolio.trim().is_empty() && !validate::is_well_formed_url(portfolio.trim()) {
                errors.push("Please enter a valid portfolio URL".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Trims every field and lowercases the email, the form the row is
    /// stored and deduplicated in.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = validate::normalize_email(&self.email);
        self.phone = self.phone.trim().to_string();
        self.github_url = self
            .github_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self.linkedin_url = self.linkedin_url.trim().to_string();
        self.portfolio_url = self
            .portfolio_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RegistrationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            event_id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0123456789".to_string(),
            github_url: Some("https://github.com/ada".to_string()),
            linkedin_url: "https://www.linkedin.com/in/ada".to_string(),
            portfolio_url: Some("https://ada.dev".to_string()),
        }
    }

    #[test]
    fn accepts_a_complete_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn collects_every_field_error() {
        let request = RegistrationRequest {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            github_url: Some("https://gitlab.com/ada".to_string()),
            linkedin_url: String::new(),
            portfolio_url: Some("not a url".to_string()),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&"Name is required".to_string()));
        assert!(errors.contains(&"LinkedIn profile URL is required".to_string()));
    }

    #[test]
    fn bare_linkedin_domain_is_accepted() {
        let request = RegistrationRequest {
            linkedin_url: "https://linkedin.com/in/ada".to_string(),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_optional_urls_are_dropped_by_normalization() {
        let request = RegistrationRequest {
            email: "  Ada@Example.COM ".to_string(),
            github_url: Some("   ".to_string()),
            portfolio_url: None,
            ..valid_request()
        }
        .normalized();
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.github_url, None);
    }

    #[test]
    fn user_listing_row_nests_its_event_summary() {
        let now = Utc::now();
        let event_id = Uuid::new_v4();
        let row = RegistrationWithEventRow {
            id: Uuid::new_v4(),
            event_id,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "0123456789".to_string(),
            github_url: None,
            linkedin_url: "https://www.linkedin.com/in/ada".to_string(),
            portfolio_url: None,
            status: RegistrationStatus::Pending,
            registered_at: now,
            created_at: now,
            updated_at: now,
            event_title: "Rust Summit".to_string(),
            event_date: now,
            event_time: "10:00 AM".to_string(),
            event_location: "Main Hall".to_string(),
        };

        let enriched = RegistrationWithEvent::from(row);
        assert_eq!(enriched.event.id, event_id);

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["event"]["title"], "Rust Summit");
        assert_eq!(json["event"]["time"], "10:00 AM");
        assert_eq!(json["event"]["location"], "Main Hall");
        assert_eq!(json["event"]["id"], json["event_id"]);
    }

    #[test]
    fn transition_matrix() {
        use RegistrationStatus::{Cancelled, Confirmed, Pending};
        let legal = [(Pending, Confirmed), (Pending, Cancelled), (Confirmed, Cancelled)];
        for from in [Pending, Confirmed, Cancelled] {
            for to in [Pending, Confirmed, Cancelled] {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RegistrationStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let parsed: RegistrationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, RegistrationStatus::Cancelled);
    }
}

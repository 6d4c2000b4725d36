use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub available_seats: i32,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of an event the per-user registration listing carries.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub available_seats: i32,
    pub image: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }
        if self.time.trim().is_empty() {
            errors.push("Time is required".to_string());
        }
        if self.location.trim().is_empty() {
            errors.push("Location is required".to_string());
        }
        if self.available_seats < 1 {
            errors.push("Available seats must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.detailed_description = self
            .detailed_description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.time = self.time.trim().to_string();
        self.location = self.location.trim().to_string();
        self.image = self.image.map(|i| i.trim().to_string()).filter(|i| !i.is_empty());
        self
    }
}

/// Partial update. Absent fields are left untouched; `image` additionally
/// treats an empty string as "clear the stored image".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub available_seats: Option<i32>,
    pub image: Option<String>,
}

impl UpdateEventRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            errors.push("Title cannot be empty".to_string());
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            errors.push("Description cannot be empty".to_string());
        }
        if matches!(&self.time, Some(t) if t.trim().is_empty()) {
            errors.push("Time cannot be empty".to_string());
        }
        if matches!(&self.location, Some(l) if l.trim().is_empty()) {
            errors.push("Location cannot be empty".to_string());
        }
        if matches!(self.available_seats, Some(s) if s < 1) {
            errors.push("Available seats must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.detailed_description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.available_seats.is_none()
            && self.image.is_none()
    }

    /// Trims provided fields. An image trimmed down to an empty string is
    /// kept as the clear-image signal, not dropped.
    pub fn normalized(mut self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        self.title = trim(self.title);
        self.description = trim(self.description);
        self.detailed_description = trim(self.detailed_description);
        self.time = trim(self.time);
        self.location = trim(self.location);
        self.image = trim(self.image);
        self
    }
}

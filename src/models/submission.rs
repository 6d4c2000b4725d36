use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "talk_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TalkType {
    Technical,
    CaseStudy,
    Workshop,
    Lightning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "time_slot", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sponsor_package")]
pub enum SponsorPackage {
    #[sqlx(rename = "TITLE")]
    #[serde(rename = "TITLE")]
    Title,
    #[sqlx(rename = "GOLD")]
    #[serde(rename = "GOLD")]
    Gold,
    #[sqlx(rename = "SILVER")]
    #[serde(rename = "SILVER")]
    Silver,
    #[sqlx(rename = "ASSOCIATE")]
    #[serde(rename = "ASSOCIATE")]
    Associate,
    #[sqlx(rename = "IN KIND")]
    #[serde(rename = "IN KIND")]
    InKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interest_area")]
pub enum InterestArea {
    #[sqlx(rename = "Volunteer")]
    Volunteer,
    #[sqlx(rename = "Management")]
    Management,
    #[sqlx(rename = "Social Media")]
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[sqlx(rename = "Content Creation")]
    #[serde(rename = "Content Creation")]
    ContentCreation,
    #[sqlx(rename = "Design")]
    Design,
}

impl SponsorPackage {
    pub fn as_str(self) -> &'static str {
        match self {
            SponsorPackage::Title => "TITLE",
            SponsorPackage::Gold => "GOLD",
            SponsorPackage::Silver => "SILVER",
            SponsorPackage::Associate => "ASSOCIATE",
            SponsorPackage::InKind => "IN KIND",
        }
    }
}

impl fmt::Display for SponsorPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InterestArea {
    pub fn as_str(self) -> &'static str {
        match self {
            InterestArea::Volunteer => "Volunteer",
            InterestArea::Management => "Management",
            InterestArea::SocialMedia => "Social Media",
            InterestArea::ContentCreation => "Content Creation",
            InterestArea::Design => "Design",
        }
    }
}

impl fmt::Display for InterestArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpeakerSubmission {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub organization: String,
    pub talk_title: String,
    pub talk_type: TalkType,
    pub talk_description: String,
    pub previous_speaking_experience: bool,
    pub speaker_bio: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub preferred_time_slot: TimeSlot,
    pub additional_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerSubmissionRequest {
    pub full_name: String,
    pub email: String,
    pub organization: String,
    pub talk_title: String,
    pub talk_type: TalkType,
    pub talk_description: String,
    #[serde(default)]
    pub previous_speaking_experience: bool,
    pub speaker_bio: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub preferred_time_slot: Option<TimeSlot>,
    pub additional_notes: Option<String>,
    /// Checked on intake, never stored.
    #[serde(default)]
    pub terms_accepted: bool,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

impl SpeakerSubmissionRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let name_len = char_len(self.full_name.trim());
        if !(2..=100).contains(&name_len) {
            errors.push("Full name must be between 2 and 100 characters".to_string());
        }
        if !validate::is_valid_email(self.email.trim()) {
            errors.push("Please enter a valid email address".to_string());
        }
        let organization_len = char_len(self.organization.trim());
        if organization_len == 0 || organization_len > 100 {
            errors.push("Organization must be between 1 and 100 characters".to_string());
        }
        let title_len = char_len(self.talk_title.trim());
        if !(5..=200).contains(&title_len) {
            errors.push("Talk title must be between 5 and 200 characters".to_string());
        }
        let description_len = char_len(self.talk_description.trim());
        if !(50..=1000).contains(&description_len) {
            errors.push("Talk description must be between 50 and 1000 characters".to_string());
        }
        if matches!(&self.speaker_bio, Some(bio) if char_len(bio.trim()) > 500) {
            errors.push("Speaker bio cannot exceed 500 characters".to_string());
        }
        if matches!(&self.additional_notes, Some(notes) if char_len(notes.trim()) > 500) {
            errors.push("Additional notes cannot exceed 500 characters".to_string());
        }
        if !self.terms_accepted {
            errors.push("You must accept the terms and conditions".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn normalized(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = validate::normalize_email(&self.email);
        self.organization = self.organization.trim().to_string();
        self.talk_title = self.talk_title.trim().to_string();
        self.talk_description = self.talk_description.trim().to_string();
        self.speaker_bio = trim_optional(self.speaker_bio);
        self.additional_notes = trim_optional(self.additional_notes);
        self.social_links = self.social_links.map(|links| SocialLinks {
            linkedin: trim_optional(links.linkedin),
            twitter: trim_optional(links.twitter),
            github: trim_optional(links.github),
        });
        self
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SponsorSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub job_title: Option<String>,
    pub package: SponsorPackage,
    pub message: Option<String>,
    pub additional_options: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SponsorSubmissionRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub job_title: Option<String>,
    pub package: SponsorPackage,
    pub message: Option<String>,
    #[serde(default)]
    pub additional_options: Vec<String>,
}

impl SponsorSubmissionRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let name_len = char_len(self.name.trim());
        if !(2..=100).contains(&name_len) {
            errors.push("Name must be between 2 and 100 characters".to_string());
        }
        if !validate::is_valid_email(self.email.trim()) {
            errors.push("Please enter a valid email address".to_string());
        }
        let company_len = char_len(self.company.trim());
        if !(2..=100).contains(&company_len) {
            errors.push("Company must be between 2 and 100 characters".to_string());
        }
        if !validate::is_relaxed_phone(self.phone.trim()) {
            errors.push("Please enter a valid phone number".to_string());
        }
        if matches!(&self.job_title, Some(title) if char_len(title.trim()) > 100) {
            errors.push("Job title cannot exceed 100 characters".to_string());
        }
        if matches!(&self.message, Some(message) if char_len(message.trim()) > 1000) {
            errors.push("Message cannot exceed 1000 characters".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = validate::normalize_email(&self.email);
        self.company = self.company.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.job_title = trim_optional(self.job_title);
        self.message = trim_optional(self.message);
        self.additional_options = self
            .additional_options
            .into_iter()
            .map(|option| option.trim().to_string())
            .filter(|option| !option.is_empty())
            .collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterestSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub interest: InterestArea,
    pub phone: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterestSubmissionRequest {
    pub name: String,
    pub email: String,
    pub interest: InterestArea,
    pub phone: String,
}

impl InterestSubmissionRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if !validate::is_valid_email(self.email.trim()) {
            errors.push("Please enter a valid email address".to_string());
        }
        let phone_len = char_len(self.phone.trim());
        if !(10..=15).contains(&phone_len) {
            errors.push("Phone number must be between 10 and 15 characters".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = validate::normalize_email(&self.email);
        self.phone = self.phone.trim().to_string();
        self
    }
}

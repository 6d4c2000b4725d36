//! Registration gatekeeping.
//!
//! Every registration write funnels through [`Ledger`]: payload validation,
//! event existence, the temporal cutoff at the event start, the one
//! registration per (event, email) rule and an advisory seat check. The
//! duplicate rule is enforced twice: a pre-check for a friendly early answer,
//! and the store's atomic insert-if-absent as the authority, so two racing
//! submissions resolve to exactly one row. The seat check has no such
//! backstop and can overshoot under concurrency.

use std::future::Future;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::event::Event;
use crate::models::registration::{Registration, RegistrationRequest, RegistrationStatus};
use crate::utils::error::AppError;

/// Persistence contract the ledger drives.
///
/// `insert_if_absent` must be atomic with respect to the (event, email)
/// uniqueness rule and answers `None` for a duplicate; the rest are plain
/// point queries.
pub trait RegistrationStore: Send + Sync {
    fn find_event(
        &self,
        event_id: Uuid,
    ) -> impl Future<Output = Result<Option<Event>, sqlx::Error>> + Send;

    /// Number of non-cancelled registrations held against an event.
    fn count_active_registrations(
        &self,
        event_id: Uuid,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    fn find_registration_by_event_and_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> impl Future<Output = Result<Option<Registration>, sqlx::Error>> + Send;

    fn insert_if_absent(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<Option<Registration>, sqlx::Error>> + Send;

    fn find_registration(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Registration>, sqlx::Error>> + Send;

    fn update_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> impl Future<Output = Result<Option<Registration>, sqlx::Error>> + Send;
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("Event not found")]
    EventNotFound,

    #[error("Registration is closed for this event")]
    RegistrationClosed,

    #[error("You have already registered for this event")]
    DuplicateRegistration,

    #[error("This event is fully booked")]
    EventFull,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("Cannot change registration status from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => AppError::ValidationError(msg),
            LedgerError::Storage(e) => AppError::DatabaseError(e),
            e @ LedgerError::EventNotFound => AppError::NotFound(e.to_string()),
            e @ LedgerError::RegistrationClosed => AppError::RegistrationClosed(e.to_string()),
            e @ LedgerError::DuplicateRegistration => AppError::Conflict(e.to_string()),
            e @ LedgerError::EventFull => AppError::CapacityExceeded(e.to_string()),
            e @ LedgerError::RegistrationNotFound => AppError::NotFound(e.to_string()),
            e @ LedgerError::InvalidTransition { .. } => AppError::ValidationError(e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ledger<S> {
    store: S,
}

impl<S: RegistrationStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs the submission checks in order and inserts the registration.
    ///
    /// Check order is fixed: validation, event existence, temporal cutoff,
    /// duplicate, capacity. New rows start `pending`.
    pub async fn submit(&self, request: RegistrationRequest) -> Result<Registration, LedgerError> {
        if let Err(errors) = request.validate() {
            return Err(LedgerError::Validation(errors.join(", ")));
        }
        let request = request.normalized();

        let event = self
            .store
            .find_event(request.event_id)
            .await?
            .ok_or(LedgerError::EventNotFound)?;

        if Utc::now() >= event.date {
            return Err(LedgerError::RegistrationClosed);
        }

        if self
            .store
            .find_registration_by_event_and_email(request.event_id, &request.email)
            .await?
            .is_some()
        {
            return Err(LedgerError::DuplicateRegistration);
        }

        let active = self.store.count_active_registrations(request.event_id).await?;
        if active >= i64::from(event.available_seats) {
            return Err(LedgerError::EventFull);
        }

        match self.store.insert_if_absent(&request).await? {
            Some(registration) => Ok(registration),
            // Lost the race between the pre-check and the insert.
            None => Err(LedgerError::DuplicateRegistration),
        }
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        next: RegistrationStatus,
    ) -> Result<Registration, LedgerError> {
        let current = self
            .store
            .find_registration(id)
            .await?
            .ok_or(LedgerError::RegistrationNotFound)?;

        if !current.status.can_transition_to(next) {
            return Err(LedgerError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        self.store
            .update_registration_status(id, next)
            .await?
            .ok_or(LedgerError::RegistrationNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{DateTime, Duration};

    use super::*;

    struct MemoryStore {
        events: Mutex<HashMap<Uuid, Event>>,
        registrations: Mutex<Vec<Registration>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                events: Mutex::new(HashMap::new()),
                registrations: Mutex::new(Vec::new()),
            }
        }

        fn add_event(&self, event: Event) {
            self.events.lock().unwrap().insert(event.id, event);
        }

        fn seed_registration(&self, event_id: Uuid, email: &str, status: RegistrationStatus) {
            let now = Utc::now();
            self.registrations.lock().unwrap().push(Registration {
                id: Uuid::new_v4(),
                event_id,
                name: "Seeded".to_string(),
                email: email.to_string(),
                phone: "0123456789".to_string(),
                github_url: None,
                linkedin_url: "https://www.linkedin.com/in/seeded".to_string(),
                portfolio_url: None,
                status,
                registered_at: now,
                created_at: now,
                updated_at: now,
            });
        }

        fn registration_count(&self) -> usize {
            self.registrations.lock().unwrap().len()
        }
    }

    impl RegistrationStore for MemoryStore {
        async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, sqlx::Error> {
            Ok(self.events.lock().unwrap().get(&event_id).cloned())
        }

        async fn count_active_registrations(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
            let count = self
                .registrations
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.event_id == event_id && r.status != RegistrationStatus::Cancelled)
                .count();
            Ok(count as i64)
        }

        async fn find_registration_by_event_and_email(
            &self,
            event_id: Uuid,
            email: &str,
        ) -> Result<Option<Registration>, sqlx::Error> {
            Ok(self
                .registrations
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.event_id == event_id && r.email == email)
                .cloned())
        }

        async fn insert_if_absent(
            &self,
            request: &RegistrationRequest,
        ) -> Result<Option<Registration>, sqlx::Error> {
            let mut registrations = self.registrations.lock().unwrap();
            let taken = registrations
                .iter()
                .any(|r| r.event_id == request.event_id && r.email == request.email);
            if taken {
                return Ok(None);
            }
            let now = Utc::now();
            let registration = Registration {
                id: Uuid::new_v4(),
                event_id: request.event_id,
                name: request.name.clone(),
                email: request.email.clone(),
                phone: request.phone.clone(),
                github_url: request.github_url.clone(),
                linkedin_url: request.linkedin_url.clone(),
                portfolio_url: request.portfolio_url.clone(),
                status: RegistrationStatus::Pending,
                registered_at: now,
                created_at: now,
                updated_at: now,
            };
            registrations.push(registration.clone());
            Ok(Some(registration))
        }

        async fn find_registration(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
            Ok(self
                .registrations
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn update_registration_status(
            &self,
            id: Uuid,
            status: RegistrationStatus,
        ) -> Result<Option<Registration>, sqlx::Error> {
            let mut registrations = self.registrations.lock().unwrap();
            let Some(registration) = registrations.iter_mut().find(|r| r.id == id) else {
                return Ok(None);
            };
            registration.status = status;
            registration.updated_at = Utc::now();
            Ok(Some(registration.clone()))
        }
    }

    /// Store whose duplicate lookup always misses, standing in for a
    /// concurrent insert landing between the pre-check and the write.
    struct StaleLookupStore {
        inner: MemoryStore,
    }

    impl RegistrationStore for StaleLookupStore {
        async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, sqlx::Error> {
            self.inner.find_event(event_id).await
        }

        async fn count_active_registrations(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
            self.inner.count_active_registrations(event_id).await
        }

        async fn find_registration_by_event_and_email(
            &self,
            _event_id: Uuid,
            _email: &str,
        ) -> Result<Option<Registration>, sqlx::Error> {
            Ok(None)
        }

        async fn insert_if_absent(
            &self,
            request: &RegistrationRequest,
        ) -> Result<Option<Registration>, sqlx::Error> {
            self.inner.insert_if_absent(request).await
        }

        async fn find_registration(&self, id: Uuid) -> Result<Option<Registration>, sqlx::Error> {
            self.inner.find_registration(id).await
        }

        async fn update_registration_status(
            &self,
            id: Uuid,
            status: RegistrationStatus,
        ) -> Result<Option<Registration>, sqlx::Error> {
            self.inner.update_registration_status(id, status).await
        }
    }

    fn event_with(seats: i32, date: DateTime<Utc>) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            title: "Rust Summit".to_string(),
            description: "Talks".to_string(),
            detailed_description: None,
            date,
            time: "10:00 AM".to_string(),
            location: "Main Hall".to_string(),
            available_seats: seats,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn request_for(event_id: Uuid, email: &str) -> RegistrationRequest {
        RegistrationRequest {
            event_id,
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            phone: "0123456789".to_string(),
            github_url: None,
            linkedin_url: "https://www.linkedin.com/in/ada".to_string(),
            portfolio_url: None,
        }
    }

    fn upcoming() -> DateTime<Utc> {
        Utc::now() + Duration::days(7)
    }

    #[tokio::test]
    async fn accepted_submission_starts_pending() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let registration = ledger
            .submit(request_for(event_id, "  Ada@Example.COM "))
            .await
            .unwrap();

        assert_eq!(registration.status, RegistrationStatus::Pending);
        assert_eq!(registration.email, "ada@example.com");
        assert_eq!(registration.event_id, event_id);
    }

    #[tokio::test]
    async fn submission_reads_back_field_for_field() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let created = ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap();
        let fetched = ledger
            .store
            .find_registration(created.id)
            .await
            .unwrap()
            .expect("submitted registration is stored");

        // The row handed back by submit is the row a later fetch returns.
        assert_eq!(
            serde_json::to_value(&fetched).unwrap(),
            serde_json::to_value(&created).unwrap()
        );
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_store() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let mut request = request_for(event_id, "ada@example.com");
        request.phone = "12345".to_string();
        request.linkedin_url = String::new();

        let err = ledger.submit(request).await.unwrap_err();
        match err {
            LedgerError::Validation(msg) => {
                assert!(msg.contains("Please enter a valid 10-digit phone number"));
                assert!(msg.contains("LinkedIn profile URL is required"));
                assert!(msg.contains(", "));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // The failed attempt left no row behind, so the same email still goes through.
        assert!(ledger.submit(request_for(event_id, "ada@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_event_is_rejected() {
        let ledger = Ledger::new(MemoryStore::new());
        let err = ledger
            .submit(request_for(Uuid::new_v4(), "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::EventNotFound));
    }

    #[tokio::test]
    async fn submissions_close_at_the_event_start() {
        let store = MemoryStore::new();
        let event = event_with(100, Utc::now() - Duration::minutes(1));
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let err = ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::RegistrationClosed));
    }

    #[tokio::test]
    async fn duplicate_email_for_the_same_event_is_rejected() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap();
        let err = ledger
            .submit(request_for(event_id, "ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRegistration));
    }

    #[tokio::test]
    async fn same_email_can_register_for_different_events() {
        let store = MemoryStore::new();
        let first = event_with(100, upcoming());
        let second = event_with(100, upcoming());
        let (first_id, second_id) = (first.id, second.id);
        store.add_event(first);
        store.add_event(second);
        let ledger = Ledger::new(store);

        assert!(ledger.submit(request_for(first_id, "ada@example.com")).await.is_ok());
        assert!(ledger.submit(request_for(second_id, "ada@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn full_event_rejects_new_registrations() {
        let store = MemoryStore::new();
        let event = event_with(1, upcoming());
        let event_id = event.id;
        store.add_event(event);
        store.seed_registration(event_id, "first@example.com", RegistrationStatus::Confirmed);
        let ledger = Ledger::new(store);

        let err = ledger
            .submit(request_for(event_id, "second@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::EventFull));
    }

    #[tokio::test]
    async fn cancelled_registrations_release_their_seat() {
        let store = MemoryStore::new();
        let event = event_with(1, upcoming());
        let event_id = event.id;
        store.add_event(event);
        store.seed_registration(event_id, "first@example.com", RegistrationStatus::Cancelled);
        let ledger = Ledger::new(store);

        assert!(ledger.submit(request_for(event_id, "second@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn single_seat_event_lifecycle() {
        let store = MemoryStore::new();
        let event = event_with(1, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let first = ledger
            .submit(request_for(event_id, "a@example.com"))
            .await
            .unwrap();
        assert_eq!(first.status, RegistrationStatus::Pending);

        // A repeat from the seat holder answers duplicate, not full.
        let err = ledger
            .submit(request_for(event_id, "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRegistration));

        let err = ledger
            .submit(request_for(event_id, "b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::EventFull));

        ledger
            .update_status(first.id, RegistrationStatus::Cancelled)
            .await
            .unwrap();
        assert!(ledger.submit(request_for(event_id, "b@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn racing_duplicates_resolve_to_one_winner() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let (first, second) = tokio::join!(
            ledger.submit(request_for(event_id, "ada@example.com")),
            ledger.submit(request_for(event_id, "ada@example.com")),
        );

        let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        let loser = if first.is_err() { first } else { second };
        assert!(matches!(loser.unwrap_err(), LedgerError::DuplicateRegistration));
    }

    #[tokio::test]
    async fn duplicate_landing_after_the_precheck_is_still_refused() {
        // With the lookup blinded, the second submission sails past the
        // pre-check and must be caught by the insert itself.
        let store = StaleLookupStore {
            inner: MemoryStore::new(),
        };
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.inner.add_event(event);
        let ledger = Ledger::new(store);

        assert!(ledger.submit(request_for(event_id, "ada@example.com")).await.is_ok());
        let err = ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRegistration));
        assert_eq!(ledger.store.inner.registration_count(), 1);
    }

    #[tokio::test]
    async fn insert_if_absent_is_the_atomicity_authority() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);

        let request = request_for(event_id, "ada@example.com").normalized();
        assert!(store.insert_if_absent(&request).await.unwrap().is_some());
        assert!(store.insert_if_absent(&request).await.unwrap().is_none());
        assert_eq!(store.registration_count(), 1);
    }

    #[tokio::test]
    async fn pending_registrations_can_confirm_then_cancel() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let registration = ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap();

        let confirmed = ledger
            .update_status(registration.id, RegistrationStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, RegistrationStatus::Confirmed);

        let cancelled = ledger
            .update_status(registration.id, RegistrationStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.status, RegistrationStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancellation_is_terminal() {
        let store = MemoryStore::new();
        let event = event_with(100, upcoming());
        let event_id = event.id;
        store.add_event(event);
        let ledger = Ledger::new(store);

        let registration = ledger
            .submit(request_for(event_id, "ada@example.com"))
            .await
            .unwrap();
        ledger
            .update_status(registration.id, RegistrationStatus::Cancelled)
            .await
            .unwrap();

        let err = ledger
            .update_status(registration.id, RegistrationStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidTransition {
                from: RegistrationStatus::Cancelled,
                to: RegistrationStatus::Confirmed,
            }
        ));
    }

    #[tokio::test]
    async fn status_update_for_unknown_registration_is_not_found() {
        let ledger = Ledger::new(MemoryStore::new());
        let err = ledger
            .update_status(Uuid::new_v4(), RegistrationStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::RegistrationNotFound));
    }
}

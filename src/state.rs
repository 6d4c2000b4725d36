use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::PgStore;
use crate::ledger::Ledger;
use crate::notify::{NewsletterClient, Notifier};

/// Shared application state. Cloned per request by axum; every field is
/// either a handle or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: PgStore,
    pub ledger: Ledger<PgStore>,
    pub notifier: Arc<Notifier>,
    pub newsletter: Arc<NewsletterClient>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let store = PgStore::new(pool);
        let notifier = Arc::new(Notifier::new(config.smtp.clone()));
        let newsletter = Arc::new(NewsletterClient::new(config.newsletter.clone()));
        Self {
            ledger: Ledger::new(store.clone()),
            store,
            notifier,
            newsletter,
            config: Arc::new(config),
        }
    }

    // Lazy pool: nothing here talks to a database.
    #[cfg(test)]
    pub(crate) fn for_tests(jwt_secret: &str) -> Self {
        let config = Config {
            port: 0,
            database_url: "postgres://localhost/summit-test".to_string(),
            jwt_secret: jwt_secret.to_string(),
            token_ttl_secs: 86_400,
            allowed_origins: Vec::new(),
            smtp: None,
            newsletter: None,
        };
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        Self::new(config, pool)
    }
}

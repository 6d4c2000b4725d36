use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 5002;
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAILERLITE_BASE_URL: &str = "https://api.mailerlite.com/api/v2";

// No Debug derives here: these structs carry credentials.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub notify_to: String,
}

#[derive(Clone)]
pub struct NewsletterConfig {
    pub api_key: String,
    pub group_id: String,
    pub base_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub allowed_origins: Vec<String>,
    pub smtp: Option<SmtpConfig>,
    pub newsletter: Option<NewsletterConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/summit".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using an insecure development secret");
            "your-secret-key".to_string()
        });

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| cors::DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            port,
            database_url,
            jwt_secret,
            token_ttl_secs,
            allowed_origins,
            smtp: smtp_from_env(),
            newsletter: newsletter_from_env(),
        }
    }
}

fn smtp_from_env() -> Option<SmtpConfig> {
    let host = env::var("SMTP_HOST").ok()?;
    let username = env::var("SMTP_USERNAME").ok()?;
    let password = env::var("SMTP_PASSWORD").ok()?;
    let port = env::var("SMTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_SMTP_PORT);
    let from_address = env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());
    let notify_to = env::var("NOTIFY_EMAIL").unwrap_or_else(|_| username.clone());
    Some(SmtpConfig {
        host,
        port,
        username,
        password,
        from_address,
        notify_to,
    })
}

fn newsletter_from_env() -> Option<NewsletterConfig> {
    let api_key = env::var("MAILERLITE_API_KEY").ok()?;
    let group_id = env::var("MAILERLITE_GROUP_ID").ok()?;
    let base_url = env::var("MAILERLITE_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_MAILERLITE_BASE_URL.to_string());
    Some(NewsletterConfig {
        api_key,
        group_id,
        base_url,
    })
}

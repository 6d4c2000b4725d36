//! Seeds an admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
//!
//! ```bash
//! ADMIN_EMAIL=admin@example.com ADMIN_PASSWORD=changeme123 cargo run --bin create-admin
//! ```

use std::env;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;

use summit_server::auth;
use summit_server::config::Config;
use summit_server::db::PgStore;
use summit_server::utils::validate::{is_valid_email, normalize_email};

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("Error creating admin: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let email = env::var("ADMIN_EMAIL").map_err(|_| "ADMIN_EMAIL is not set")?;
    let password = env::var("ADMIN_PASSWORD").map_err(|_| "ADMIN_PASSWORD is not set")?;

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        return Err("ADMIN_EMAIL is not a valid email address".into());
    }
    if password.chars().count() < 8 {
        return Err("ADMIN_PASSWORD must be at least 8 characters".into());
    }

    let config = Config::from_env();

    println!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;

    // Safe to run before the server has ever started.
    sqlx::migrate!().run(&pool).await?;

    let store = PgStore::new(pool);
    if store.find_admin_by_email(&email).await?.is_some() {
        println!("Admin account already exists");
        return Ok(());
    }

    let password_hash = auth::hash_password(&password)?;
    store.insert_admin(&email, &password_hash).await?;

    println!("Admin account created successfully");
    println!("Email: {email}");

    Ok(())
}

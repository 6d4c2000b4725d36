use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::{self, AdminIdentity};
use crate::db;
use crate::handlers::AppJson;
use crate::models::admin::{AdminProfile, CreateAdminRequest, LoginRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::utils::validate;

// Unknown email and wrong password answer identically.
fn invalid_credentials() -> AppError {
    AppError::AuthError("Invalid credentials".to_string())
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    let email = validate::normalize_email(&request.email);
    let Some(admin) = state.store.find_admin_by_email(&email).await? else {
        return Err(invalid_credentials());
    };

    if !auth::verify_password(&request.password, &admin.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = auth::issue_token(admin.id, &state.config.jwt_secret, state.config.token_ttl_secs)?;
    let profile = AdminProfile::from(admin);
    Ok(success(json!({ "token": token, "admin": profile }), "Login successful").into_response())
}

pub async fn verify(
    admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let profile = state
        .store
        .find_admin_by_id(admin.admin_id)
        .await?
        .map(AdminProfile::from)
        .ok_or_else(|| AppError::AuthError("Invalid or expired token".to_string()))?;
    Ok(success(profile, "Token is valid").into_response())
}

pub async fn create_admin(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateAdminRequest>,
) -> Result<Response, AppError> {
    let email = validate::normalize_email(&request.email);
    if !validate::is_valid_email(&email) {
        return Err(AppError::ValidationError("Please enter a valid email address".to_string()));
    }
    if request.password.chars().count() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if state.store.find_admin_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("An admin with this email already exists".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let admin = match state.store.insert_admin(&email, &password_hash).await {
        Ok(admin) => admin,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::Conflict("An admin with this email already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(created(AdminProfile::from(admin), "Admin created successfully").into_response())
}

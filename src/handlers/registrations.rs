use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::auth::AdminIdentity;
use crate::handlers::{parse_uuid, AppJson};
use crate::ledger::RegistrationStore;
use crate::models::registration::{RegistrationRequest, UpdateStatusRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, list, success};
use crate::utils::validate;

pub async fn create_registration(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegistrationRequest>,
) -> Result<Response, AppError> {
    let registration = state.ledger.submit(request).await?;
    Ok(created(registration, "Registration successful").into_response())
}

pub async fn list_event_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    let event_id = parse_uuid(&event_id, "event")?;
    let registrations = state.store.list_registrations_for_event(event_id).await?;
    Ok(list(registrations).into_response())
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "registration")?;
    let registration = state
        .store
        .find_registration(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".to_string()))?;
    Ok(success(registration, "Registration retrieved").into_response())
}

pub async fn list_user_registrations(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let email = validate::normalize_email(&email);
    let registrations = state.store.list_registrations_for_email(&email).await?;
    Ok(list(registrations).into_response())
}

pub async fn update_registration_status(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "registration")?;
    let registration = state.ledger.update_status(id, request.status).await?;
    Ok(success(registration, "Registration status updated successfully").into_response())
}

pub async fn delete_registration(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "registration")?;
    if state.store.delete_registration(id).await? {
        Ok(empty_success("Registration deleted successfully").into_response())
    } else {
        Err(AppError::NotFound("Registration not found".to_string()))
    }
}

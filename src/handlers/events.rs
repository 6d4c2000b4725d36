use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::auth::AdminIdentity;
use crate::db;
use crate::handlers::{parse_uuid, AppJson};
use crate::models::event::{CreateEventRequest, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, list, success};

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.list_events().await?;
    Ok(list(events).into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "event")?;
    let event = state
        .store
        .find_event_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    Ok(success(event, "Event retrieved").into_response())
}

pub async fn create_event(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateEventRequest>,
) -> Result<Response, AppError> {
    if let Err(errors) = request.validate() {
        return Err(AppError::ValidationError(errors.join(", ")));
    }
    let request = request.normalized();
    let event = state.store.insert_event(&request).await?;
    Ok(created(event, "Event created successfully").into_response())
}

pub async fn update_event(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(update): AppJson<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "event")?;
    if update.is_empty() {
        return Err(AppError::ValidationError("No fields provided to update".to_string()));
    }
    if let Err(errors) = update.validate() {
        return Err(AppError::ValidationError(errors.join(", ")));
    }
    let update = update.normalized();
    let event = state
        .store
        .update_event(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    Ok(success(event, "Event updated successfully").into_response())
}

pub async fn delete_event(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id, "event")?;
    match state.store.delete_event(id).await {
        Ok(true) => Ok(empty_success("Event deleted successfully").into_response()),
        Ok(false) => Err(AppError::NotFound("Event not found".to_string())),
        Err(e) if db::is_foreign_key_violation(&e) => Err(AppError::Conflict(
            "Cannot delete an event that has registrations".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

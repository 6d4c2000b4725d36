use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::handlers::AppJson;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;
use crate::utils::validate;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

pub async fn subscribe(
    State(state): State<AppState>,
    AppJson(request): AppJson<SubscribeRequest>,
) -> Result<Response, AppError> {
    let email = validate::normalize_email(&request.email);
    if !validate::is_valid_email(&email) {
        return Err(AppError::ValidationError("Please enter a valid email address".to_string()));
    }

    state.newsletter.subscribe(&email).await?;
    Ok(empty_success("Successfully subscribed to the newsletter").into_response())
}

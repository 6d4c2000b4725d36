use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::db;
use crate::handlers::AppJson;
use crate::models::submission::InterestSubmissionRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, list};

pub async fn submit_interest(
    State(state): State<AppState>,
    AppJson(request): AppJson<InterestSubmissionRequest>,
) -> Result<Response, AppError> {
    if let Err(errors) = request.validate() {
        return Err(AppError::ValidationError(errors.join(", ")));
    }
    let request = request.normalized();

    if state.store.find_interest_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict(
            "This email has already been used to express interest".to_string(),
        ));
    }

    let submission = match state.store.insert_interest_submission(&request).await {
        Ok(submission) => submission,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::Conflict(
                "This phone number has already been used to express interest".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let notifier = state.notifier.clone();
    let notification = submission.clone();
    tokio::spawn(async move {
        notifier.notify_interest_submission(&notification).await;
    });

    Ok(created(submission, "Interest submitted successfully").into_response())
}

pub async fn list_interest(State(state): State<AppState>) -> Result<Response, AppError> {
    let submissions = state.store.list_interest_submissions().await?;
    Ok(list(submissions).into_response())
}

use axum::extract::FromRequest;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod admin;
pub mod events;
pub mod interest;
pub mod registrations;
pub mod speakers;
pub mod sponsors;
pub mod subscribe;

/// JSON body extractor whose rejection uses the standard error envelope
/// instead of axum's plain-text response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path ids arrive as strings so a malformed UUID answers with the usual
/// validation envelope rather than a bare 400.
pub(crate) fn parse_uuid(raw: &str, label: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::ValidationError(format!("Invalid {label} ID")))
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "summit-api",
    };

    success(payload, "Health check successful").into_response()
}

pub async fn welcome() -> Response {
    let payload = json!({
        "name": "Summit API",
        "endpoints": {
            "events": "/api/events",
            "registrations": "/api/registrations",
            "speakers": "/api/speakers",
            "sponsors": "/api/sponsors",
            "interest": "/api/email",
            "subscribe": "/api/subscribe",
            "admin_auth": "/api/admin/auth",
            "health": "/health",
        },
    });

    success(payload, "Welcome to the Summit API").into_response()
}

pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("Route {} not found", uri.path())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_uuids_map_to_a_validation_message() {
        let err = parse_uuid("not-a-uuid", "event").unwrap_err();
        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Invalid event ID"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(parse_uuid("b9e7a718-11cf-46f1-a1e3-7a714eaf50e9", "event").is_ok());
    }
}

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{self, admin, events, interest, registrations, speakers, sponsors, subscribe};
use crate::state::AppState;

// Event images arrive inline as data URLs, so JSON bodies run large.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events))
        .route("/create", post(events::create_event))
        .route(
            "/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}

fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(registrations::create_registration))
        .route("/event/:event_id", get(registrations::list_event_registrations))
        .route("/user/:email", get(registrations::list_user_registrations))
        .route(
            "/:id",
            get(registrations::get_registration).delete(registrations::delete_registration),
        )
        .route("/:id/status", patch(registrations::update_registration_status))
}

fn speaker_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(speakers::list_speakers))
        .route("/submit", post(speakers::submit_speaker))
}

fn sponsor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sponsors::list_sponsors))
        .route("/submit", post(sponsors::submit_sponsor))
}

fn interest_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(interest::list_interest))
        .route("/submit", post(interest::submit_interest))
}

fn admin_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/verify", get(admin::verify))
        .route("/create", post(admin::create_admin))
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .nest("/api/events", event_routes())
        .nest("/api/registrations", registration_routes())
        // The dashboard consumes the same routers under /api/admin.
        .nest("/api/admin/events", event_routes())
        .nest("/api/admin/registrations", registration_routes())
        .nest("/api/speakers", speaker_routes())
        .nest("/api/sponsors", sponsor_routes())
        .nest("/api/email", interest_routes())
        .route("/api/subscribe", post(subscribe::subscribe))
        .nest("/api/admin/auth", admin_auth_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer(&state.config.allowed_origins))
        .with_state(state)
}

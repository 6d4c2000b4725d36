use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match parse_origins(allowed_origins) {
        Some(origins) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
            layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
        // Wildcard origins cannot be combined with credentials.
        None => {
            tracing::warn!(
                "CORS: No valid origins configured, using permissive settings for development"
            );
            layer.allow_origin(AllowOrigin::any())
        }
    }
}

fn parse_origins(allowed_origins: &[String]) -> Option<Vec<HeaderValue>> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<HeaderValue>() {
                    Ok(value) => {
                        tracing::debug!("CORS: Allowing origin: {}", trimmed);
                        Some(value)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                        None
                    }
                }
            }
        })
        .collect();

    if origins.is_empty() {
        None
    } else {
        Some(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer() {
        // Should not panic when creating the CORS layer
        let origins = vec!["http://localhost:3000".to_string()];
        let _layer = create_cors_layer(&origins);
        let _fallback = create_cors_layer(&[]);
    }

    #[test]
    fn test_default_origins_are_valid() {
        // Verify default origins can be parsed as HeaderValues
        for origin in DEFAULT_ALLOWED_ORIGINS.split(',') {
            let trimmed = origin.trim();
            assert!(
                trimmed.parse::<HeaderValue>().is_ok(),
                "Default origin '{}' should be a valid HeaderValue",
                trimmed
            );
        }
    }

    #[test]
    fn test_invalid_origins_are_filtered_out() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "not an origin\u{7f}".to_string(),
            "  ".to_string(),
        ];
        let parsed = parse_origins(&origins).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_all_invalid_origins_fall_back_to_none() {
        assert!(parse_origins(&["\u{7f}".to_string()]).is_none());
        assert!(parse_origins(&[]).is_none());
    }
}

//! Admin credentials: bcrypt password hashing and HS256 bearer tokens.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::AppError;

const BCRYPT_COST: u32 = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(admin_id: Uuid, secret: &str, ttl_secs: i64) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: admin_id,
        iat: now,
        exp: now + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::AuthError("Invalid or expired token".to_string()))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {e}")))
}

/// Verified admin identity. Handlers that take this as an argument are only
/// reachable with a valid bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity {
    pub admin_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::AuthError("Missing authorization token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::AuthError("Invalid authorization header".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret)?;
        Ok(AdminIdentity {
            admin_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::state::AppState;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_preserves_the_subject() {
        let admin_id = Uuid::new_v4();
        let token = issue_token(admin_id, SECRET, 86_400).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, admin_id);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = issue_token(Uuid::new_v4(), "other-secret", 86_400).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_passwords_fail_verification() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn extractor_accepts_a_valid_bearer_token() {
        let state = AppState::for_tests(SECRET);
        let admin_id = Uuid::new_v4();
        let token = issue_token(admin_id, SECRET, 86_400).unwrap();

        let request = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();

        let identity = AdminIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(identity.admin_id, admin_id);
    }

    #[tokio::test]
    async fn extractor_rejects_missing_and_malformed_headers() {
        let state = AppState::for_tests(SECRET);

        let request = Request::builder().body(()).unwrap();
        let (mut parts, ()) = request.into_parts();
        assert!(AdminIdentity::from_request_parts(&mut parts, &state).await.is_err());

        let token = issue_token(Uuid::new_v4(), SECRET, 86_400).unwrap();
        let request = Request::builder()
            .header(AUTHORIZATION, token)
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();
        assert!(AdminIdentity::from_request_parts(&mut parts, &state).await.is_err());
    }
}

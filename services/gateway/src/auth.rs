//! Admin session tokens
//!
//! The login endpoint checks the configured credentials and issues an
//! HS256 JWT; the `AdminUser` extractor validates it on every admin route.
//! Everything behind the extractor trusts that the caller is authorized.

use crate::error::AppError;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Admin token lifetime: long enough to cover one event evening.
const TOKEN_TTL_SECS: u64 = 12 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Issue a signed admin token for `username`.
pub fn issue_token(username: &str, secret: &str) -> Result<String, AppError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(anyhow::Error::new)?
        .as_secs();
    let claims = Claims {
        sub: username.to_string(),
        exp: (now + TOKEN_TTL_SECS) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AppError::Internal(anyhow::Error::new(err)))
}

/// An authenticated administrator, extracted from `Authorization: Bearer`
pub struct AdminUser {
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing authentication credentials".into()))?;
        let auth = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid header string".into()))?;
        let token = auth
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected bearer token".into()))?;

        let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::default())
            .map_err(|err| AppError::Unauthorized(format!("Invalid token: {}", err)))?;

        Ok(AdminUser {
            username: token_data.claims.sub,
        })
    }
}

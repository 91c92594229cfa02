// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::error::AppError;
use crate::models::{OwnedEntry, Role};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the HttpOnly session cookie.
pub const SESSION_COOKIE: &str = "fitsync_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role at the time the session was issued
    #[serde(default)]
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and administrators may read, change and delete an entry.
    pub fn can_access(&self, entry: &impl OwnedEntry) -> bool {
        self.is_admin() || entry.owner_id() == self.user_id
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.trim().to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let claims = decode_jwt(&token, &state.config.jwt_signing_key)?;

    let auth_user = AuthUser {
        user_id: claims.sub,
        role: claims.role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Middleware that lets only administrators through.
///
/// Must run after [`require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.user_id, "Non-admin denied access to admin route");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Validate a session token and return its claims.
pub fn decode_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    if token_data.claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(token_data.claims)
}

/// Create a JWT for a user session.
pub fn create_jwt(
    user_id: &str,
    role: Role,
    signing_key: &[u8],
    ttl_days: i64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;
    let ttl_secs = usize::try_from(ttl_days.max(1))? * 24 * 60 * 60;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

    struct Entry(&'static str);

    impl OwnedEntry for Entry {
        fn owner_id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_jwt_round_trip_keeps_role() {
        let token = create_jwt("user-1", Role::Admin, KEY, 30).unwrap();
        let claims = decode_jwt(&token, KEY).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_jwt_wrong_key_rejected() {
        let token = create_jwt("user-1", Role::User, KEY, 30).unwrap();
        let result = decode_jwt(&token, b"another_key_that_is_32_bytes_ok!");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_can_access_owner_or_admin() {
        let owner = AuthUser {
            user_id: "alice".to_string(),
            role: Role::User,
        };
        let stranger = AuthUser {
            user_id: "bob".to_string(),
            role: Role::User,
        };
        let admin = AuthUser {
            user_id: "root".to_string(),
            role: Role::Admin,
        };
        let entry = Entry("alice");

        assert!(owner.can_access(&entry));
        assert!(!stranger.can_access(&entry));
        assert!(admin.can_access(&entry));
    }
}

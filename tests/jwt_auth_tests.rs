// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that JWT tokens created by auth routes can be decoded
//! by the auth middleware, catching compatibility issues early.

use fitsync::error::AppError;
use fitsync::middleware::auth::{create_jwt, decode_jwt};
use fitsync::models::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wire format of the session claims. If `create_jwt` or the middleware
/// changes shape, these tests should catch the incompatibility.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    exp: usize,
    iat: usize,
}

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_jwt_wire_format() {
    let token = create_jwt("5f0c-user", Role::User, SIGNING_KEY, 30).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "5f0c-user");
    assert_eq!(token_data.claims.role, "user");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_expiration_follows_ttl() {
    let token = create_jwt("u1", Role::Admin, SIGNING_KEY, 30).unwrap();
    let claims = decode_jwt(&token, SIGNING_KEY).unwrap();

    assert_eq!(claims.role, Role::Admin);
    assert!(
        claims.exp > now() + 86400 * 29,
        "Token expiration should be ~30 days in the future"
    );
}

#[test]
fn test_expired_token_rejected() {
    let claims = Claims {
        sub: "u1".to_string(),
        role: "user".to_string(),
        exp: now() - 3600,
        iat: now() - 7200,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(matches!(
        decode_jwt(&token, SIGNING_KEY),
        Err(AppError::InvalidToken)
    ));
}

#[test]
fn test_token_without_role_defaults_to_user() {
    #[derive(Serialize)]
    struct LegacyClaims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let token = encode(
        &Header::new(Algorithm::HS256),
        &LegacyClaims {
            sub: "u1".to_string(),
            exp: now() + 3600,
            iat: now(),
        },
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    let claims = decode_jwt(&token, SIGNING_KEY).unwrap();
    assert_eq!(claims.role, Role::User);
}

#[test]
fn test_other_algorithms_rejected() {
    let claims = Claims {
        sub: "u1".to_string(),
        role: "admin".to_string(),
        exp: now() + 3600,
        iat: now(),
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(decode_jwt(&token, SIGNING_KEY).is_err());
}

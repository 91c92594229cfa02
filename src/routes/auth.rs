// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: registration, login/logout and the caller's own profile.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE};
use crate::models::user::normalize_email;
use crate::models::{ActivityLevel, Goal, Role, Sex, User};
use crate::routes::MessageResponse;
use crate::services::password::{
    hash_password_blocking, verify_password_blocking, UNMATCHABLE_HASH,
};
use crate::AppState;

/// Routes reachable without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes for the authenticated caller's own account.
pub fn profile_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/auth/profile",
        get(get_profile).put(update_profile).delete(delete_profile),
    )
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    /// Centimeters
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub bmi: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
            age: user.age,
            gender: user.gender,
            height: user.height_cm,
            weight: user.weight_kg,
            goal: user.goal,
            activity_level: user.activity_level,
            bmi: user.bmi,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}

/// Session issued by register and login.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 10, max = 120))]
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    #[validate(range(min = 50.0, max = 300.0))]
    pub height: Option<f64>,
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight: Option<f64>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile fields that both the owner and an administrator may change.
///
/// Absent fields keep their stored value; zero is a real value, not "unset".
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 10, max = 120))]
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    #[validate(range(min = 50.0, max = 300.0))]
    pub height: Option<f64>,
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight: Option<f64>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: ProfileChanges,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Register a new account and start a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let email = normalize_email(&req.email);
    if state.db.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password_blocking(req.password).await?;
    let now = chrono::Utc::now().to_rfc3339();

    let mut user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        password_hash,
        role: Role::User,
        name,
        age: req.age,
        gender: req.gender,
        height_cm: None,
        weight_kg: None,
        goal: req.goal.unwrap_or_default(),
        activity_level: req.activity_level.unwrap_or_default(),
        bmi: None,
        created_at: now.clone(),
        updated_at: now,
    };
    user.set_body_metrics(req.height, req.weight);

    state.db.upsert_user(&user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    let (jar, body) = start_session(&state.config, jar, &user)?;
    Ok((StatusCode::CREATED, jar, body))
}

/// Exchange email and password for a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let email = normalize_email(&req.email);
    let user = state.db.get_user_by_email(&email).await?;

    // Unknown emails verify against a dummy hash; both rejections cost the same.
    let stored_hash = user
        .as_ref()
        .map_or_else(|| UNMATCHABLE_HASH.to_string(), |u| u.password_hash.clone());
    let verified = verify_password_blocking(req.password, stored_hash).await?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }
        None => {
            tracing::info!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    tracing::info!(user_id = %user.id, "User logged in");
    start_session(&state.config, jar, &user)
}

/// Clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, clear_session(&state.config, jar))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, &auth.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let mut user = load_user(&state, &auth.user_id).await?;
    apply_profile_changes(&state, &mut user, req.changes).await?;

    if let Some(password) = req.password {
        user.password_hash = hash_password_blocking(password).await?;
        tracing::info!(user_id = %user.id, "Password changed");
    }

    user.updated_at = chrono::Utc::now().to_rfc3339();
    state.db.upsert_user(&user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Delete the caller's account together with all of their meals and workouts.
async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    load_user(&state, &auth.user_id).await?;

    let deleted = state.db.delete_user_data(&auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, deleted, "Account deleted by owner");

    Ok((
        clear_session(&state.config, jar),
        MessageResponse::new("Account and associated data deleted successfully"),
    ))
}

/// Fetch a user or fail with 404.
pub(crate) async fn load_user(state: &AppState, user_id: &str) -> Result<User> {
    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Apply a partial profile update, keeping email unique and BMI in sync.
pub(crate) async fn apply_profile_changes(
    state: &AppState,
    user: &mut User,
    changes: ProfileChanges,
) -> Result<()> {
    if let Some(name) = changes.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        user.name = name.to_string();
    }

    if let Some(email) = changes.email {
        let email = normalize_email(&email);
        if email != user.email {
            if let Some(existing) = state.db.get_user_by_email(&email).await? {
                if existing.id != user.id {
                    return Err(AppError::Conflict("Email already in use".to_string()));
                }
            }
            user.email = email;
        }
    }

    if changes.age.is_some() {
        user.age = changes.age;
    }
    if changes.gender.is_some() {
        user.gender = changes.gender;
    }
    if let Some(goal) = changes.goal {
        user.goal = goal;
    }
    if let Some(level) = changes.activity_level {
        user.activity_level = level;
    }

    if changes.height.is_some() || changes.weight.is_some() {
        user.set_body_metrics(
            changes.height.or(user.height_cm),
            changes.weight.or(user.weight_kg),
        );
    }

    Ok(())
}

fn start_session(
    config: &Config,
    jar: CookieJar,
    user: &User,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let token = create_jwt(
        &user.id,
        user.role,
        &config.jwt_signing_key,
        config.session_ttl_days,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = session_cookie(config, token.clone());

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Session cookie attributes. Removal must repeat them or browsers keep the
/// original cookie.
fn session_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(config.session_ttl_days))
        .build()
}

fn clear_session(config: &Config, jar: CookieJar) -> CookieJar {
    jar.remove(session_cookie(config, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User {
            id: "u1".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            role: Role::User,
            name: "John".to_string(),
            age: Some(30),
            gender: Some(Sex::Male),
            height_cm: Some(175.0),
            weight_kg: Some(75.0),
            goal: Goal::WeightLoss,
            activity_level: ActivityLevel::Active,
            bmi: Some(24.49),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(json["activityLevel"], "active");
        assert_eq!(json["goal"], "weight_loss");
        assert_eq!(json["height"], 175.0);
    }

    #[test]
    fn test_register_request_validation() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "password": "123",
            "name": "",
            "age": 5
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn test_update_request_flattens_changes() {
        let req: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "weight": 80.0,
            "activityLevel": "very_active",
            "password": "newsecret"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.changes.weight, Some(80.0));
        assert_eq!(req.changes.activity_level, Some(ActivityLevel::VeryActive));
        assert_eq!(req.password.as_deref(), Some("newsecret"));
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrator routes. Mounted behind `require_auth` + `require_admin`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::EntryQuery;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Role, User};
use crate::routes::auth::{apply_profile_changes, load_user, ProfileChanges, UserResponse};
use crate::routes::meals::MealResponse;
use crate::routes::workouts::WorkoutResponse;
use crate::routes::MessageResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route(
            "/api/admin/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/admin/meals", get(list_meals))
        .route("/api/admin/meals/{id}", delete(delete_meal))
        .route("/api/admin/workouts", get(list_workouts))
        .route("/api/admin/workouts/{id}", delete(delete_workout))
        .route("/api/admin/stats", get(platform_stats))
}

/// Owner details embedded in admin entry listings.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// An entry plus its owner. `user` is null if the owner no longer exists.
#[derive(Debug, Serialize)]
pub struct WithOwner<T> {
    #[serde(flatten)]
    pub entry: T,
    pub user: Option<OwnerSummary>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Accounts with the `user` role; administrators are not counted
    pub total_users: usize,
    pub total_meals: usize,
    pub total_workouts: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: ProfileChanges,
    pub role: Option<Role>,
}

/// Summary returned after an admin edit.
#[derive(Debug, Serialize)]
pub struct UpdatedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, &user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<AdminUpdateUserRequest>, JsonRejection>,
) -> Result<Json<UpdatedUser>> {
    let Json(req) = payload?;
    req.validate()?;

    let mut user = load_user(&state, &user_id).await?;
    apply_profile_changes(&state, &mut user, req.changes).await?;
    if let Some(role) = req.role {
        user.role = role;
    }
    user.updated_at = chrono::Utc::now().to_rfc3339();

    state.db.upsert_user(&user).await?;
    tracing::info!(
        admin_id = %admin.user_id,
        user_id = %user.id,
        role = user.role.as_str(),
        "User updated by admin"
    );

    Ok(Json(UpdatedUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

/// Delete a user and cascade their meals and workouts.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    load_user(&state, &user_id).await?;

    let deleted = state.db.delete_user_data(&user_id).await?;
    tracing::info!(admin_id = %admin.user_id, user_id, deleted, "User deleted by admin");

    Ok(MessageResponse::new(
        "User and associated data deleted successfully",
    ))
}

/// Every meal on the platform, newest first, with its owner.
async fn list_meals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WithOwner<MealResponse>>>> {
    let all = EntryQuery::default();
    let (meals, owners) = tokio::try_join!(
        state.db.list_meals(&all),
        owner_index(&state),
    )?;

    Ok(Json(
        meals
            .iter()
            .map(|meal| WithOwner {
                entry: MealResponse::from(meal),
                user: owners.get(&meal.user_id).cloned(),
            })
            .collect(),
    ))
}

async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(meal_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .get_meal(&meal_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal not found".to_string()))?;

    state.db.delete_meal(&meal_id).await?;
    tracing::info!(admin_id = %admin.user_id, meal_id, "Meal deleted by admin");

    Ok(MessageResponse::new("Meal deleted successfully"))
}

/// Every workout on the platform, newest first, with its owner.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WithOwner<WorkoutResponse>>>> {
    let all = EntryQuery::default();
    let (workouts, owners) = tokio::try_join!(
        state.db.list_workouts(&all),
        owner_index(&state),
    )?;

    Ok(Json(
        workouts
            .iter()
            .map(|workout| WithOwner {
                entry: WorkoutResponse::from(workout),
                user: owners.get(&workout.user_id).cloned(),
            })
            .collect(),
    ))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .get_workout(&workout_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    state.db.delete_workout(&workout_id).await?;
    tracing::info!(admin_id = %admin.user_id, workout_id, "Workout deleted by admin");

    Ok(MessageResponse::new("Workout deleted successfully"))
}

async fn platform_stats(State(state): State<Arc<AppState>>) -> Result<Json<PlatformStats>> {
    let (total_users, total_meals, total_workouts) = tokio::try_join!(
        state.db.count_users_with_role(Role::User),
        state.db.count_meals(),
        state.db.count_workouts(),
    )?;

    Ok(Json(PlatformStats {
        total_users,
        total_meals,
        total_workouts,
    }))
}

/// Map of user ID to owner summary, for embedding in entry listings.
async fn owner_index(state: &AppState) -> Result<HashMap<String, OwnerSummary>> {
    let users = state.db.list_users().await?;
    Ok(users
        .iter()
        .map(|user| (user.id.clone(), OwnerSummary::from(user)))
        .collect())
}

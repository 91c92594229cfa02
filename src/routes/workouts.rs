// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::EntryQuery;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Intensity, Workout, WorkoutStats, WorkoutType};
use crate::routes::meals::{non_blank, parse_entry_date};
use crate::routes::{DateRangeParams, MessageResponse};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/stats/summary", get(workout_summary))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub date: String,
    /// Minutes
    pub duration: u32,
    pub intensity: Intensity,
    pub calories_burned: f64,
    pub description: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    /// Kilometers
    pub distance: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Workout> for WorkoutResponse {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id.clone(),
            user_id: workout.user_id.clone(),
            name: workout.name.clone(),
            workout_type: workout.workout_type,
            date: format_utc_rfc3339(workout.date),
            duration: workout.duration_minutes,
            intensity: workout.intensity,
            calories_burned: workout.calories_burned,
            description: workout.description.clone(),
            sets: workout.sets,
            reps: workout.reps,
            distance: workout.distance_km,
            created_at: workout.created_at.clone(),
            updated_at: workout.updated_at.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 200, message = "Workout name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub date: Option<String>,
    #[validate(range(min = 1, max = 1440, message = "Duration must be at least 1 minute"))]
    pub duration: u32,
    pub intensity: Option<Intensity>,
    #[validate(range(min = 0.0, message = "Calories cannot be negative"))]
    pub calories_burned: f64,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<WorkoutType>,
    pub date: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub duration: Option<u32>,
    pub intensity: Option<Intensity>,
    #[validate(range(min = 0.0))]
    pub calories_burned: Option<f64>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutListParams {
    #[serde(flatten)]
    pub range: DateRangeParams,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
}

/// List the caller's workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<WorkoutListParams>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let range = params.range.parse()?;
    let entry_type = match params.workout_type.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => Some(
            WorkoutType::from_name(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid type: {}", raw)))?
                .as_str(),
        ),
        None => None,
    };

    let query = EntryQuery {
        user_id: Some(auth.user_id.clone()),
        start: range.start,
        end: range.end,
        entry_type,
    };
    let workouts = state.db.list_workouts(&query).await?;

    tracing::debug!(user_id = %auth.user_id, count = workouts.len(), "Listed workouts");
    Ok(Json(workouts.iter().map(WorkoutResponse::from).collect()))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let name = non_blank(&req.name, "Workout name is required")?;
    let date = match req.date.as_deref() {
        Some(raw) => parse_entry_date(raw)?,
        None => chrono::Utc::now(),
    };
    let now = chrono::Utc::now().to_rfc3339();

    let workout = Workout {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: auth.user_id.clone(),
        name,
        workout_type: req.workout_type,
        date,
        duration_minutes: req.duration,
        intensity: req.intensity.unwrap_or_default(),
        calories_burned: req.calories_burned,
        description: req.description.map(|d| d.trim().to_string()),
        sets: req.sets,
        reps: req.reps,
        distance_km: req.distance,
        created_at: now.clone(),
        updated_at: now,
    };

    state.db.set_workout(&workout).await?;
    tracing::info!(user_id = %auth.user_id, workout_id = %workout.id, "Workout logged");

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(&workout))))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<WorkoutResponse>> {
    let workout = load_accessible_workout(&state, &auth, &workout_id).await?;
    Ok(Json(WorkoutResponse::from(&workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    payload: std::result::Result<Json<UpdateWorkoutRequest>, JsonRejection>,
) -> Result<Json<WorkoutResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let mut workout = load_accessible_workout(&state, &auth, &workout_id).await?;
    apply_workout_update(&mut workout, req)?;
    workout.updated_at = chrono::Utc::now().to_rfc3339();

    state.db.set_workout(&workout).await?;
    tracing::info!(user_id = %auth.user_id, workout_id = %workout.id, "Workout updated");

    Ok(Json(WorkoutResponse::from(&workout)))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let workout = load_accessible_workout(&state, &auth, &workout_id).await?;
    state.db.delete_workout(&workout.id).await?;
    tracing::info!(user_id = %auth.user_id, workout_id = %workout.id, "Workout deleted");

    Ok(MessageResponse::new("Workout deleted successfully"))
}

/// Exercise totals for the caller over an optional date range.
async fn workout_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<WorkoutStats>> {
    let range = params.parse()?;
    let query = EntryQuery {
        start: range.start,
        end: range.end,
        ..EntryQuery::for_user(&auth.user_id)
    };
    let workouts = state.db.list_workouts(&query).await?;

    Ok(Json(WorkoutStats::from_workouts(&workouts)))
}

async fn load_accessible_workout(
    state: &AppState,
    auth: &AuthUser,
    workout_id: &str,
) -> Result<Workout> {
    let workout = state
        .db
        .get_workout(workout_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    if !auth.can_access(&workout) {
        tracing::warn!(user_id = %auth.user_id, workout_id, "Workout access denied");
        return Err(AppError::Forbidden);
    }

    Ok(workout)
}

fn apply_workout_update(workout: &mut Workout, req: UpdateWorkoutRequest) -> Result<()> {
    if let Some(name) = req.name {
        workout.name = non_blank(&name, "Workout name cannot be empty")?;
    }
    if let Some(workout_type) = req.workout_type {
        workout.workout_type = workout_type;
    }
    if let Some(raw) = req.date {
        workout.date = parse_entry_date(&raw)?;
    }
    if let Some(duration) = req.duration {
        workout.duration_minutes = duration;
    }
    if let Some(intensity) = req.intensity {
        workout.intensity = intensity;
    }
    if let Some(calories) = req.calories_burned {
        workout.calories_burned = calories;
    }
    if let Some(description) = req.description {
        workout.description = Some(description.trim().to_string());
    }
    if req.sets.is_some() {
        workout.sets = req.sets;
    }
    if req.reps.is_some() {
        workout.reps = req.reps;
    }
    if req.distance.is_some() {
        workout.distance_km = req.distance;
    }
    Ok(())
}

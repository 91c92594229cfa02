// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal log routes.

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
use crate::models::meal::DEFAULT_PORTION;
use crate::models::{Meal, MealStats, MealType};
use crate::routes::{DateRangeParams, MessageResponse};
use crate::time_utils::{format_utc_rfc3339, parse_date, DayBound};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meals", get(list_meals).post(create_meal))
        .route("/api/meals/stats/summary", get(meal_summary))
        .route(
            "/api/meals/{id}",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub meal_type: MealType,
    pub date: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub description: Option<String>,
    pub portion: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Meal> for MealResponse {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id.clone(),
            user_id: meal.user_id.clone(),
            name: meal.name.clone(),
            meal_type: meal.meal_type,
            date: format_utc_rfc3339(meal.date),
            calories: meal.calories,
            protein: meal.protein,
            carbs: meal.carbs,
            fats: meal.fats,
            description: meal.description.clone(),
            portion: meal.portion.clone(),
            created_at: meal.created_at.clone(),
            updated_at: meal.updated_at.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[validate(length(min = 1, max = 200, message = "Meal name is required"))]
    pub name: String,
    pub meal_type: MealType,
    /// RFC 3339 or `YYYY-MM-DD`; defaults to now
    pub date: Option<String>,
    #[validate(range(min = 0.0, message = "Calories cannot be negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fats: Option<f64>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub portion: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub meal_type: Option<MealType>,
    pub date: Option<String>,
    #[validate(range(min = 0.0))]
    pub calories: Option<f64>,
    #[validate(range(min = 0.0))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fats: Option<f64>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub portion: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealListParams {
    #[serde(flatten)]
    pub range: DateRangeParams,
    pub meal_type: Option<String>,
}

/// List the caller's meals, newest first.
async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<MealListParams>,
) -> Result<Json<Vec<MealResponse>>> {
    let range = params.range.parse()?;
    let entry_type = match params.meal_type.as_deref().filter(|t| !t.is_empty()) {
        Some(raw) => Some(
            MealType::from_name(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid mealType: {}", raw)))?
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
    let meals = state.db.list_meals(&query).await?;

    tracing::debug!(user_id = %auth.user_id, count = meals.len(), "Listed meals");
    Ok(Json(meals.iter().map(MealResponse::from).collect()))
}

async fn create_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MealResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let name = non_blank(&req.name, "Meal name is required")?;
    let date = match req.date.as_deref() {
        Some(raw) => parse_entry_date(raw)?,
        None => chrono::Utc::now(),
    };
    let now = chrono::Utc::now().to_rfc3339();

    let meal = Meal {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: auth.user_id.clone(),
        name,
        meal_type: req.meal_type,
        date,
        calories: req.calories,
        protein: req.protein.unwrap_or(0.0),
        carbs: req.carbs.unwrap_or(0.0),
        fats: req.fats.unwrap_or(0.0),
        description: req.description.map(|d| d.trim().to_string()),
        portion: req.portion.unwrap_or_else(|| DEFAULT_PORTION.to_string()),
        created_at: now.clone(),
        updated_at: now,
    };

    state.db.set_meal(&meal).await?;
    tracing::info!(user_id = %auth.user_id, meal_id = %meal.id, "Meal logged");

    Ok((StatusCode::CREATED, Json(MealResponse::from(&meal))))
}

async fn get_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(meal_id): Path<String>,
) -> Result<Json<MealResponse>> {
    let meal = load_accessible_meal(&state, &auth, &meal_id).await?;
    Ok(Json(MealResponse::from(&meal)))
}

async fn update_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(meal_id): Path<String>,
    payload: std::result::Result<Json<UpdateMealRequest>, JsonRejection>,
) -> Result<Json<MealResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let mut meal = load_accessible_meal(&state, &auth, &meal_id).await?;
    apply_meal_update(&mut meal, req)?;
    meal.updated_at = chrono::Utc::now().to_rfc3339();

    state.db.set_meal(&meal).await?;
    tracing::info!(user_id = %auth.user_id, meal_id = %meal.id, "Meal updated");

    Ok(Json(MealResponse::from(&meal)))
}

async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(meal_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let meal = load_accessible_meal(&state, &auth, &meal_id).await?;
    state.db.delete_meal(&meal.id).await?;
    tracing::info!(user_id = %auth.user_id, meal_id = %meal.id, "Meal deleted");

    Ok(MessageResponse::new("Meal deleted successfully"))
}

/// Nutrition totals for the caller over an optional date range.
async fn meal_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<MealStats>> {
    let range = params.parse()?;
    let query = EntryQuery {
        start: range.start,
        end: range.end,
        ..EntryQuery::for_user(&auth.user_id)
    };
    let meals = state.db.list_meals(&query).await?;

    Ok(Json(MealStats::from_meals(&meals)))
}

/// Fetch a meal the caller may act on: 404 if missing, 403 if not theirs.
async fn load_accessible_meal(state: &AppState, auth: &AuthUser, meal_id: &str) -> Result<Meal> {
    let meal = state
        .db
        .get_meal(meal_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal not found".to_string()))?;

    if !auth.can_access(&meal) {
        tracing::warn!(user_id = %auth.user_id, meal_id, "Meal access denied");
        return Err(AppError::Forbidden);
    }

    Ok(meal)
}

/// Overwrite each field present in the request; owner never changes.
fn apply_meal_update(meal: &mut Meal, req: UpdateMealRequest) -> Result<()> {
    if let Some(name) = req.name {
        meal.name = non_blank(&name, "Meal name cannot be empty")?;
    }
    if let Some(meal_type) = req.meal_type {
        meal.meal_type = meal_type;
    }
    if let Some(raw) = req.date {
        meal.date = parse_entry_date(&raw)?;
    }
    if let Some(calories) = req.calories {
        meal.calories = calories;
    }
    if let Some(protein) = req.protein {
        meal.protein = protein;
    }
    if let Some(carbs) = req.carbs {
        meal.carbs = carbs;
    }
    if let Some(fats) = req.fats {
        meal.fats = fats;
    }
    if let Some(description) = req.description {
        meal.description = Some(description.trim().to_string());
    }
    if let Some(portion) = req.portion {
        meal.portion = portion;
    }
    Ok(())
}

pub(crate) fn parse_entry_date(raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_date(raw, DayBound::Start)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", raw)))
}

pub(crate) fn non_blank(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_meal() -> Meal {
        Meal {
            id: "m1".to_string(),
            user_id: "owner".to_string(),
            name: "Oatmeal".to_string(),
            meal_type: MealType::Breakfast,
            date: parse_date("2024-01-15T08:00:00Z", DayBound::Start).unwrap(),
            calories: 300.0,
            protein: 10.0,
            carbs: 50.0,
            fats: 6.0,
            description: None,
            portion: DEFAULT_PORTION.to_string(),
            created_at: "2024-01-15T08:00:00Z".to_string(),
            updated_at: "2024-01-15T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_update_keeps_absent_fields_and_accepts_zero() {
        let mut meal = stored_meal();
        let req = UpdateMealRequest {
            calories: Some(0.0),
            portion: Some("half bowl".to_string()),
            ..UpdateMealRequest::default()
        };

        apply_meal_update(&mut meal, req).unwrap();

        assert_eq!(meal.calories, 0.0);
        assert_eq!(meal.portion, "half bowl");
        assert_eq!(meal.name, "Oatmeal");
        assert_eq!(meal.protein, 10.0);
        assert_eq!(meal.user_id, "owner");
    }

    #[test]
    fn test_update_rejects_blank_name_and_bad_date() {
        let mut meal = stored_meal();
        let blank = UpdateMealRequest {
            name: Some("   ".to_string()),
            ..UpdateMealRequest::default()
        };
        assert!(matches!(
            apply_meal_update(&mut meal, blank),
            Err(AppError::BadRequest(_))
        ));

        let bad_date = UpdateMealRequest {
            date: Some("tomorrow".to_string()),
            ..UpdateMealRequest::default()
        };
        assert!(apply_meal_update(&mut meal, bad_date).is_err());
    }

    #[test]
    fn test_create_request_rejects_negative_values() {
        let req: CreateMealRequest = serde_json::from_value(serde_json::json!({
            "name": "Cake",
            "mealType": "snack",
            "calories": -5.0,
            "fats": -1.0
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("calories"));
        assert!(errors.field_errors().contains_key("fats"));
    }

    #[test]
    fn test_response_is_camel_case() {
        let json = serde_json::to_value(MealResponse::from(&stored_meal())).unwrap();

        assert_eq!(json["mealType"], "breakfast");
        assert_eq!(json["userId"], "owner");
        assert_eq!(json["date"], "2024-01-15T08:00:00Z");
        assert!(json.get("meal_type").is_none());
    }
}

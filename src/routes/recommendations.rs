// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal-based recommendations and daily nutrition targets.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::Goal;
use crate::routes::auth::load_user;
use crate::services::recommendations::{
    meals_for, workouts_for, MealRecommendation, WorkoutRecommendation,
};
use crate::services::{calculate, DailyTargets, NutritionInput};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recommendations/workouts", get(workout_recommendations))
        .route("/api/recommendations/meals", get(meal_recommendations))
        .route("/api/recommendations/daily-targets", get(daily_targets))
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse<T: 'static> {
    pub goal: Goal,
    pub recommendations: &'static [T],
    pub message: String,
}

impl<T: 'static> RecommendationsResponse<T> {
    fn new(kind: &str, goal: Goal, recommendations: &'static [T]) -> Self {
        Self {
            goal,
            recommendations,
            message: format!("{} recommendations based on your {} goal", kind, goal.label()),
        }
    }
}

async fn workout_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RecommendationsResponse<WorkoutRecommendation>>> {
    let goal = load_user(&state, &auth.user_id).await?.goal;
    Ok(Json(RecommendationsResponse::new(
        "Workout",
        goal,
        workouts_for(goal),
    )))
}

async fn meal_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RecommendationsResponse<MealRecommendation>>> {
    let goal = load_user(&state, &auth.user_id).await?.goal;
    Ok(Json(RecommendationsResponse::new("Meal", goal, meals_for(goal))))
}

/// Calorie and macro targets for the caller's current profile.
///
/// 422 if weight, height or age is missing.
async fn daily_targets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DailyTargets>> {
    let user = load_user(&state, &auth.user_id).await?;
    let input = NutritionInput::from_profile(&user)?;
    let targets = calculate(&input);

    tracing::debug!(
        user_id = %auth.user_id,
        target_calories = targets.target_calories,
        "Computed daily targets"
    );
    Ok(Json(targets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_uses_goal_label() {
        let response =
            RecommendationsResponse::new("Workout", Goal::WeightLoss, workouts_for(Goal::WeightLoss));
        assert_eq!(
            response.message,
            "Workout recommendations based on your weight loss goal"
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["goal"], "weight_loss");
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_meal_message_for_default_goal() {
        let response =
            RecommendationsResponse::new("Meal", Goal::default(), meals_for(Goal::default()));
        assert_eq!(
            response.message,
            "Meal recommendations based on your maintenance goal"
        );
    }
}

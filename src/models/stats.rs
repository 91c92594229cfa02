//! Meal and workout aggregates for dashboard summaries.
//!
//! Entries arrive already filtered by owner and date range; these types only
//! reduce them. Fractional totals are summed in whole hundredths so the result
//! is exact and independent of input order.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Meal, Workout};

/// Totals over a set of meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MealStats {
    pub total_meals: u32,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
}

impl MealStats {
    /// Add a single meal to the running totals.
    pub fn record(&mut self, meal: &Meal) {
        self.total_meals += 1;
        add_hundredths(&mut self.total_calories, meal.calories);
        add_hundredths(&mut self.total_protein, meal.protein);
        add_hundredths(&mut self.total_carbs, meal.carbs);
        add_hundredths(&mut self.total_fats, meal.fats);
    }

    pub fn from_meals<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        meals.into_iter().fold(Self::default(), |mut stats, meal| {
            stats.record(meal);
            stats
        })
    }
}

/// Totals over a set of workouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: u32,
    /// Minutes
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration: u64,
    pub total_calories_burned: f64,
    /// Kilometers; workouts without a distance count as zero
    pub total_distance: f64,
}

impl WorkoutStats {
    /// Add a single workout to the running totals.
    pub fn record(&mut self, workout: &Workout) {
        self.total_workouts += 1;
        self.total_duration += u64::from(workout.duration_minutes);
        add_hundredths(&mut self.total_calories_burned, workout.calories_burned);
        add_hundredths(&mut self.total_distance, workout.distance_km.unwrap_or(0.0));
    }

    pub fn from_workouts<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> Self {
        workouts
            .into_iter()
            .fold(Self::default(), |mut stats, workout| {
                stats.record(workout);
                stats
            })
    }
}

/// `total += value`, both taken to two decimals and added as integers.
fn add_hundredths(total: &mut f64, value: f64) {
    let sum = (*total * 100.0).round() as i64 + (value * 100.0).round() as i64;
    *total = sum as f64 / 100.0;
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal-keyed catalog of suggested workouts and meals.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Goal, Intensity, MealType, WorkoutType};

/// A suggested workout.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecommendation {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Minutes
    pub duration: u32,
    pub calories_burned: u32,
    pub intensity: Intensity,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

/// A suggested meal.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendation {
    pub name: &'static str,
    pub meal_type: MealType,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub description: &'static str,
}

const fn workout(
    name: &'static str,
    workout_type: WorkoutType,
    duration: u32,
    calories_burned: u32,
    intensity: Intensity,
    description: &'static str,
) -> WorkoutRecommendation {
    WorkoutRecommendation {
        name,
        workout_type,
        duration,
        calories_burned,
        intensity,
        description,
        sets: None,
        reps: None,
        distance: None,
    }
}

const fn strength(
    name: &'static str,
    duration: u32,
    calories_burned: u32,
    intensity: Intensity,
    description: &'static str,
    sets: u32,
    reps: u32,
) -> WorkoutRecommendation {
    WorkoutRecommendation {
        sets: Some(sets),
        reps: Some(reps),
        ..workout(
            name,
            WorkoutType::Strength,
            duration,
            calories_burned,
            intensity,
            description,
        )
    }
}

const fn distance(workout: WorkoutRecommendation, km: u32) -> WorkoutRecommendation {
    WorkoutRecommendation {
        distance: Some(km),
        ..workout
    }
}

const fn meal(
    name: &'static str,
    meal_type: MealType,
    calories: u32,
    protein: u32,
    carbs: u32,
    fats: u32,
    description: &'static str,
) -> MealRecommendation {
    MealRecommendation {
        name,
        meal_type,
        calories,
        protein,
        carbs,
        fats,
        description,
    }
}

use Intensity::{High, Low, Moderate};
use MealType::{Breakfast, Dinner, Lunch, Snack};
use WorkoutType::{Cardio, Flexibility};

#[rustfmt::skip]
static WEIGHT_LOSS_WORKOUTS: [WorkoutRecommendation; 5] = [
    workout("Running", Cardio, 30, 300, Moderate, "Great for burning calories and improving cardiovascular health"),
    workout("Cycling", Cardio, 45, 400, Moderate, "Low impact cardio that burns fat effectively"),
    workout("Swimming", Cardio, 30, 350, Moderate, "Full body workout with minimal joint stress"),
    workout("HIIT Training", Cardio, 20, 300, High, "High intensity intervals for maximum calorie burn"),
    workout("Jump Rope", Cardio, 15, 200, High, "Effective cardio that can be done anywhere"),
];

#[rustfmt::skip]
static WEIGHT_GAIN_WORKOUTS: [WorkoutRecommendation; 5] = [
    strength("Bench Press", 45, 200, High, "Build upper body mass and strength", 4, 8),
    strength("Squats", 45, 250, High, "Essential for building leg mass", 4, 10),
    strength("Deadlifts", 45, 300, High, "Full body compound movement for mass", 3, 8),
    strength("Pull-ups", 30, 150, Moderate, "Build back and arm strength", 4, 10),
    strength("Shoulder Press", 30, 150, Moderate, "Develop shoulder mass and strength", 4, 10),
];

#[rustfmt::skip]
static MUSCLE_GAIN_WORKOUTS: [WorkoutRecommendation; 5] = [
    strength("Weight Training", 60, 250, High, "Progressive overload for muscle growth", 4, 8),
    strength("Compound Lifts", 60, 300, High, "Multiple muscle groups for maximum growth", 5, 5),
    strength("Hypertrophy Training", 50, 200, Moderate, "Moderate weight, high volume for size", 4, 12),
    strength("Push-Pull Split", 55, 250, High, "Balanced training for all muscle groups", 4, 10),
    strength("Leg Day", 60, 300, High, "Focus on lower body development", 4, 10),
];

#[rustfmt::skip]
static MAINTENANCE_WORKOUTS: [WorkoutRecommendation; 5] = [
    workout("Jogging", Cardio, 30, 250, Moderate, "Maintain cardiovascular fitness"),
    workout("Bodyweight Circuit", WorkoutType::Strength, 30, 200, Moderate, "Full body maintenance routine"),
    workout("Yoga", Flexibility, 45, 150, Low, "Improve flexibility and mindfulness"),
    workout("Walking", Cardio, 45, 150, Low, "Low impact daily activity"),
    strength("Light Resistance Training", 40, 180, Moderate, "Maintain muscle tone", 3, 12),
];

#[rustfmt::skip]
static ENDURANCE_WORKOUTS: [WorkoutRecommendation; 5] = [
    distance(workout("Long Distance Running", Cardio, 60, 600, Moderate, "Build cardiovascular endurance"), 10),
    distance(workout("Cycling", Cardio, 90, 700, Moderate, "Low impact endurance training"), 30),
    workout("Swimming Laps", Cardio, 45, 400, Moderate, "Full body endurance workout"),
    workout("Rowing", Cardio, 40, 400, Moderate, "Full body cardiovascular endurance"),
    distance(workout("Trail Running", Cardio, 50, 500, Moderate, "Varied terrain for endurance"), 8),
];

#[rustfmt::skip]
static WEIGHT_LOSS_MEALS: [MealRecommendation; 5] = [
    meal("Grilled Chicken Salad", Lunch, 350, 40, 20, 10, "High protein, low calorie meal"),
    meal("Greek Yogurt with Berries", Breakfast, 200, 15, 25, 5, "Light, protein-rich breakfast"),
    meal("Vegetable Stir-fry", Dinner, 300, 15, 35, 12, "Low calorie, nutrient dense"),
    meal("Protein Smoothie", Snack, 180, 20, 15, 5, "Quick protein boost"),
    meal("Baked Salmon with Veggies", Dinner, 400, 35, 20, 18, "Omega-3 rich, filling meal"),
];

#[rustfmt::skip]
static WEIGHT_GAIN_MEALS: [MealRecommendation; 5] = [
    meal("Protein Pancakes", Breakfast, 550, 35, 60, 15, "High calorie breakfast for gains"),
    meal("Beef and Rice Bowl", Lunch, 700, 45, 80, 20, "Mass building meal"),
    meal("Pasta with Meat Sauce", Dinner, 800, 40, 95, 25, "Calorie dense dinner"),
    meal("Peanut Butter Sandwich", Snack, 400, 15, 40, 18, "Quick calorie boost"),
    meal("Mass Gainer Shake", Snack, 600, 50, 75, 10, "High calorie protein shake"),
];

#[rustfmt::skip]
static MUSCLE_GAIN_MEALS: [MealRecommendation; 5] = [
    meal("Egg White Omelette", Breakfast, 300, 35, 15, 8, "Lean protein breakfast"),
    meal("Chicken and Sweet Potato", Lunch, 500, 45, 50, 10, "Balanced muscle building meal"),
    meal("Steak with Quinoa", Dinner, 650, 50, 45, 25, "High protein dinner"),
    meal("Cottage Cheese Bowl", Snack, 200, 25, 10, 5, "Casein protein snack"),
    meal("Tuna Salad", Lunch, 350, 40, 20, 12, "Lean protein source"),
];

#[rustfmt::skip]
static MAINTENANCE_MEALS: [MealRecommendation; 5] = [
    meal("Balanced Breakfast Bowl", Breakfast, 400, 20, 50, 12, "Well-rounded breakfast"),
    meal("Turkey Sandwich", Lunch, 450, 30, 45, 15, "Balanced midday meal"),
    meal("Grilled Fish with Rice", Dinner, 500, 35, 55, 15, "Healthy dinner option"),
    meal("Mixed Nuts", Snack, 200, 8, 12, 16, "Nutrient dense snack"),
    meal("Vegetable Soup", Lunch, 250, 10, 35, 8, "Light, nutritious meal"),
];

#[rustfmt::skip]
static ENDURANCE_MEALS: [MealRecommendation; 5] = [
    meal("Oatmeal with Banana", Breakfast, 350, 12, 65, 6, "Slow-release energy"),
    meal("Whole Grain Pasta", Lunch, 550, 20, 85, 12, "Carb-loading meal"),
    meal("Energy Bar", Snack, 250, 10, 40, 7, "Quick energy boost"),
    meal("Rice and Beans", Dinner, 450, 18, 75, 8, "Complex carbs for endurance"),
    meal("Sports Drink Smoothie", Snack, 200, 8, 38, 3, "Electrolyte and energy replenishment"),
];

/// Suggested workouts for a goal.
pub fn workouts_for(goal: Goal) -> &'static [WorkoutRecommendation] {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS_WORKOUTS,
        Goal::WeightGain => &WEIGHT_GAIN_WORKOUTS,
        Goal::MuscleGain => &MUSCLE_GAIN_WORKOUTS,
        Goal::Maintenance => &MAINTENANCE_WORKOUTS,
        Goal::Endurance => &ENDURANCE_WORKOUTS,
    }
}

/// Suggested meals for a goal.
pub fn meals_for(goal: Goal) -> &'static [MealRecommendation] {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS_MEALS,
        Goal::WeightGain => &WEIGHT_GAIN_MEALS,
        Goal::MuscleGain => &MUSCLE_GAIN_MEALS,
        Goal::Maintenance => &MAINTENANCE_MEALS,
        Goal::Endurance => &ENDURANCE_MEALS,
    }
}

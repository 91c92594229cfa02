// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily calorie and macro targets from body metrics.
//!
//! BMR uses the Mifflin-St Jeor equation, TDEE scales it by a fixed activity
//! multiplier, and the goal adds a calorie offset and selects a macro split.
//! Everything here is pure arithmetic; rounding happens only when building
//! [`DailyTargets`].

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{ActivityLevel, Goal, Sex, User};

/// kcal per gram of protein or carbohydrate.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// kcal per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

const MALE_BMR_OFFSET: f64 = 5.0;
const FEMALE_BMR_OFFSET: f64 = -161.0;
/// Midpoint of the male and female offsets.
const UNSPECIFIED_BMR_OFFSET: f64 = (MALE_BMR_OFFSET + FEMALE_BMR_OFFSET) / 2.0;

/// Body metrics that failed the calculator's preconditions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NutritionError {
    #[error("Profile is missing {0}")]
    MissingMetric(&'static str),

    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Fraction of target calories assigned to each macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroRatios {
    pub fn sum(&self) -> f64 {
        self.protein + self.carbs + self.fats
    }
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl Goal {
    /// kcal added to TDEE to get the daily target.
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::WeightLoss => -500.0,
            Goal::WeightGain => 500.0,
            Goal::MuscleGain => 300.0,
            Goal::Endurance => 200.0,
            Goal::Maintenance => 0.0,
        }
    }

    pub fn macro_ratios(&self) -> MacroRatios {
        let (protein, carbs, fats) = match self {
            Goal::WeightLoss => (0.35, 0.35, 0.30),
            Goal::WeightGain => (0.30, 0.45, 0.25),
            Goal::MuscleGain => (0.40, 0.35, 0.25),
            Goal::Endurance => (0.25, 0.55, 0.20),
            Goal::Maintenance => (0.30, 0.40, 0.30),
        };
        MacroRatios {
            protein,
            carbs,
            fats,
        }
    }
}

/// Validated calculator input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl NutritionInput {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        sex: Sex,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> Result<Self, NutritionError> {
        check_positive("weight", weight_kg)?;
        check_positive("height", height_cm)?;
        check_positive("age", f64::from(age_years))?;

        Ok(Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
            activity_level,
            goal,
        })
    }

    /// Build input from a stored profile.
    ///
    /// Weight, height and age are required. An unset gender is treated like
    /// `Sex::Other`; goal and activity level already carry their defaults.
    pub fn from_profile(user: &User) -> Result<Self, NutritionError> {
        let weight = user.weight_kg.ok_or(NutritionError::MissingMetric("weight"))?;
        let height = user.height_cm.ok_or(NutritionError::MissingMetric("height"))?;
        let age = user.age.ok_or(NutritionError::MissingMetric("age"))?;

        Self::new(
            weight,
            height,
            age,
            user.gender.unwrap_or(Sex::Other),
            user.activity_level,
            user.goal,
        )
    }

    /// Basal metabolic rate in kcal/day (unrounded).
    pub fn bmr(&self) -> f64 {
        let offset = match self.sex {
            Sex::Male => MALE_BMR_OFFSET,
            Sex::Female => FEMALE_BMR_OFFSET,
            Sex::Other => UNSPECIFIED_BMR_OFFSET,
        };
        10.0 * self.weight_kg + 6.25 * self.height_cm - 5.0 * f64::from(self.age_years) + offset
    }

    /// Total daily energy expenditure in kcal/day (unrounded).
    pub fn tdee(&self) -> f64 {
        self.bmr() * self.activity_level.multiplier()
    }

    /// Daily calorie target in kcal (unrounded).
    pub fn target_calories(&self) -> f64 {
        self.tdee() + self.goal.calorie_offset()
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), NutritionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NutritionError::NonPositive { field, value })
    }
}

/// Macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct MacroTargets {
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

/// Daily targets as returned by `GET /api/recommendations/daily-targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub macros: MacroTargets,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
}

/// Compute daily targets. Rounds half away from zero, once, at the end.
pub fn calculate(input: &NutritionInput) -> DailyTargets {
    let target = input.target_calories();
    let ratios = input.goal.macro_ratios();

    DailyTargets {
        bmr: round_kcal(input.bmr()),
        tdee: round_kcal(input.tdee()),
        target_calories: round_kcal(target),
        macros: MacroTargets {
            protein: round_kcal(target * ratios.protein / KCAL_PER_GRAM_PROTEIN),
            carbs: round_kcal(target * ratios.carbs / KCAL_PER_GRAM_CARBS),
            fats: round_kcal(target * ratios.fats / KCAL_PER_GRAM_FAT),
        },
        goal: input.goal,
        activity_level: input.activity_level,
    }
}

fn round_kcal(value: f64) -> i32 {
    value.round() as i32
}

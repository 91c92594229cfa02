// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Biological sex category used by the BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// Fitness goal. Drives the calorie offset and macro split.
///
/// Deserialization is lenient: unrecognized values become `Maintenance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Goal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    #[default]
    Maintenance,
    Endurance,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::WeightGain,
        Goal::MuscleGain,
        Goal::Maintenance,
        Goal::Endurance,
    ];

    /// Parse a goal name, falling back to `Maintenance` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "weight_loss" => Goal::WeightLoss,
            "weight_gain" => Goal::WeightGain,
            "muscle_gain" => Goal::MuscleGain,
            "endurance" => Goal::Endurance,
            _ => Goal::Maintenance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::WeightGain => "weight_gain",
            Goal::MuscleGain => "muscle_gain",
            Goal::Maintenance => "maintenance",
            Goal::Endurance => "endurance",
        }
    }

    /// Human-readable form, e.g. "weight loss".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        Goal::from_name(&value)
    }
}

/// Self-reported activity level. Drives the TDEE multiplier.
///
/// Deserialization is lenient: unrecognized values become `Moderate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Parse an activity level name, falling back to `Moderate` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        ActivityLevel::from_name(&value)
    }
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// UUID (also used as document ID)
    pub id: String,
    /// Email address, lowercased and unique
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    /// Display name
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Derived from height and weight; see [`compute_bmi`]
    pub bmi: Option<f64>,
    /// When the account was created (ISO 8601)
    pub created_at: String,
    /// Last profile write (ISO 8601)
    pub updated_at: String,
}

impl User {
    /// Write height and weight together, keeping BMI consistent with them.
    pub fn set_body_metrics(&mut self, height_cm: Option<f64>, weight_kg: Option<f64>) {
        self.height_cm = height_cm;
        self.weight_kg = weight_kg;
        self.bmi = compute_bmi(weight_kg, height_cm);
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Body Mass Index rounded to two decimals.
///
/// Returns `None` if either measurement is missing or not positive.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height_m = height_cm.filter(|h| h.is_finite() && *h > 0.0)? / 100.0;
    let bmi = weight / (height_m * height_m);
    Some((bmi * 100.0).round() / 100.0)
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

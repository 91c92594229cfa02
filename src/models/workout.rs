// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout log entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::OwnedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Sports,
    Other,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Flexibility,
        WorkoutType::Sports,
        WorkoutType::Other,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Cardio => "cardio",
            WorkoutType::Strength => "strength",
            WorkoutType::Flexibility => "flexibility",
            WorkoutType::Sports => "sports",
            WorkoutType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

/// Stored workout record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// UUID (also used as document ID)
    pub id: String,
    /// Owning user ID. Set at creation, never reassigned.
    pub user_id: String,
    pub name: String,
    pub workout_type: WorkoutType,
    /// When the workout happened
    #[serde(with = "crate::time_utils::rfc3339_seconds")]
    pub date: DateTime<Utc>,
    /// Duration in minutes (at least 1)
    pub duration_minutes: u32,
    #[serde(default)]
    pub intensity: Intensity,
    /// Energy in kcal
    pub calories_burned: f64,
    pub description: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    /// Distance in kilometers
    pub distance_km: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl OwnedEntry for Workout {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_names_match_serde() {
        for workout_type in WorkoutType::ALL {
            let json = serde_json::to_value(workout_type).unwrap();
            assert_eq!(json, workout_type.as_str());
            assert_eq!(WorkoutType::from_name(workout_type.as_str()), Some(workout_type));
        }
        assert_eq!(WorkoutType::from_name("pilates"), None);
    }

    #[test]
    fn test_intensity_defaults_to_moderate() {
        assert_eq!(Intensity::default(), Intensity::Moderate);
    }
}

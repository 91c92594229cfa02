// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meal log entry model.

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
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Strict parse of a stored/query value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name.trim())
    }

    /// Stored field value, used in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

pub const DEFAULT_PORTION: &str = "1 serving";

/// Stored meal record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// UUID (also used as document ID)
    pub id: String,
    /// Owning user ID. Set at creation, never reassigned.
    pub user_id: String,
    pub name: String,
    pub meal_type: MealType,
    /// When the meal was eaten
    #[serde(with = "crate::time_utils::rfc3339_seconds")]
    pub date: DateTime<Utc>,
    /// Energy in kcal
    pub calories: f64,
    /// Grams
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    pub description: Option<String>,
    /// Portion label (e.g. "1 serving", "200 g")
    pub portion: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OwnedEntry for Meal {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_names_match_serde() {
        for meal_type in MealType::ALL {
            let json = serde_json::to_value(meal_type).unwrap();
            assert_eq!(json, meal_type.as_str());
            assert_eq!(MealType::from_name(meal_type.as_str()), Some(meal_type));
        }
        assert_eq!(MealType::from_name("brunch"), None);
    }
}

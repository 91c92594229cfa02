// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod meal;
pub mod stats;
pub mod user;
pub mod workout;

pub use meal::{Meal, MealType};
pub use stats::{MealStats, WorkoutStats};
pub use user::{ActivityLevel, Goal, Role, Sex, User};
pub use workout::{Intensity, Workout, WorkoutType};

/// A log entry that belongs to exactly one user.
pub trait OwnedEntry {
    fn owner_id(&self) -> &str;
}

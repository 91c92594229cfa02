// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Domain services (nutrition targets, recommendations, password hashing).

pub mod nutrition;
pub mod password;
pub mod recommendations;

pub use nutrition::{calculate, DailyTargets, NutritionError, NutritionInput};

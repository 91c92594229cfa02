// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Populate Firestore with demo accounts, meals and workouts.
//!
//! Existing demo accounts (matched by email) are deleted together with
//! their entries and recreated, so the tool can be rerun safely. Other
//! users are left alone.
//!
//! ```text
//! FIRESTORE_EMULATOR_HOST=localhost:8080 cargo run --bin seed-demo-data
//! ```

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use fitsync::db::FirestoreDb;
use fitsync::models::meal::DEFAULT_PORTION;
use fitsync::models::{
    ActivityLevel, Goal, Intensity, Meal, MealType, Role, Sex, User, Workout, WorkoutType,
};
use fitsync::services::password::hash_password;

struct DemoUser {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: Role,
    age: u32,
    gender: Sex,
    height_cm: f64,
    weight_kg: f64,
    goal: Goal,
    activity_level: ActivityLevel,
}

#[rustfmt::skip]
const DEMO_USERS: [DemoUser; 4] = [
    DemoUser { email: "admin@fitsync.com", password: "admin123", name: "Admin User", role: Role::Admin, age: 30, gender: Sex::Male, height_cm: 175.0, weight_kg: 75.0, goal: Goal::Maintenance, activity_level: ActivityLevel::Moderate },
    DemoUser { email: "john@example.com", password: "password123", name: "John Doe", role: Role::User, age: 28, gender: Sex::Male, height_cm: 180.0, weight_kg: 85.0, goal: Goal::WeightLoss, activity_level: ActivityLevel::Active },
    DemoUser { email: "jane@example.com", password: "password123", name: "Jane Smith", role: Role::User, age: 25, gender: Sex::Female, height_cm: 165.0, weight_kg: 60.0, goal: Goal::MuscleGain, activity_level: ActivityLevel::VeryActive },
    DemoUser { email: "mike@example.com", password: "password123", name: "Mike Johnson", role: Role::User, age: 35, gender: Sex::Male, height_cm: 175.0, weight_kg: 90.0, goal: Goal::WeightLoss, activity_level: ActivityLevel::Moderate },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let project_id = std::env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());
    let db = FirestoreDb::new(&project_id)
        .await
        .context("connecting to Firestore")?;

    let now = Utc::now();

    for demo in &DEMO_USERS {
        if let Some(existing) = db.get_user_by_email(demo.email).await? {
            let deleted = db.delete_user_data(&existing.id).await?;
            tracing::info!(email = demo.email, deleted, "Removed previous demo account");
        }

        let user = build_user(demo, now)?;
        db.upsert_user(&user).await?;
        tracing::info!(email = demo.email, user_id = %user.id, "Created user");

        // Administrators don't log food or exercise
        if user.role == Role::Admin {
            continue;
        }

        let meals = demo_meals(&user.id, now);
        db.batch_set_meals(&meals).await?;
        let workouts = demo_workouts(&user.id, now);
        db.batch_set_workouts(&workouts).await?;
        tracing::info!(
            name = %user.name,
            meals = meals.len(),
            workouts = workouts.len(),
            "Created entries"
        );
    }

    tracing::info!("Database seeded successfully");
    for demo in &DEMO_USERS {
        println!("{:<6} {} / {}", demo.role.as_str(), demo.email, demo.password);
    }

    Ok(())
}

fn build_user(demo: &DemoUser, now: DateTime<Utc>) -> anyhow::Result<User> {
    let password_hash = hash_password(demo.password)
        .map_err(|e| anyhow::anyhow!("hashing demo password: {}", e))?;

    let mut user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: demo.email.to_string(),
        password_hash,
        role: demo.role,
        name: demo.name.to_string(),
        age: Some(demo.age),
        gender: Some(demo.gender),
        height_cm: None,
        weight_kg: None,
        goal: demo.goal,
        activity_level: demo.activity_level,
        bmi: None,
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    };
    user.set_body_metrics(Some(demo.height_cm), Some(demo.weight_kg));
    Ok(user)
}

fn demo_meals(user_id: &str, now: DateTime<Utc>) -> Vec<Meal> {
    #[rustfmt::skip]
    let rows = [
        ("Oatmeal with Berries", MealType::Breakfast, 350.0, 12.0, 55.0, 8.0, "Healthy breakfast with fresh berries", 2),
        ("Grilled Chicken Salad", MealType::Lunch, 400.0, 45.0, 25.0, 12.0, "Mixed greens with grilled chicken breast", 2),
        ("Salmon with Vegetables", MealType::Dinner, 550.0, 40.0, 35.0, 25.0, "Baked salmon with roasted vegetables", 1),
        ("Protein Smoothie", MealType::Snack, 250.0, 30.0, 25.0, 5.0, "Banana and protein powder smoothie", 0),
    ];

    rows.into_iter()
        .map(
            |(name, meal_type, calories, protein, carbs, fats, description, days_ago)| Meal {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                name: name.to_string(),
                meal_type,
                date: now - Duration::days(days_ago),
                calories,
                protein,
                carbs,
                fats,
                description: Some(description.to_string()),
                portion: DEFAULT_PORTION.to_string(),
                created_at: now.to_rfc3339(),
                updated_at: now.to_rfc3339(),
            },
        )
        .collect()
}

fn demo_workouts(user_id: &str, now: DateTime<Utc>) -> Vec<Workout> {
    let workout = |name: &str, workout_type, duration_minutes, intensity, calories_burned, days_ago| {
        Workout {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            workout_type,
            date: now - Duration::days(days_ago),
            duration_minutes,
            intensity,
            calories_burned,
            description: None,
            sets: None,
            reps: None,
            distance_km: None,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    };

    vec![
        Workout {
            distance_km: Some(5.0),
            description: Some("5K morning run".to_string()),
            ..workout("Morning Run", WorkoutType::Cardio, 30, Intensity::Moderate, 300.0, 2)
        },
        Workout {
            sets: Some(4),
            reps: Some(10),
            description: Some("Chest and back workout".to_string()),
            ..workout("Upper Body Workout", WorkoutType::Strength, 45, Intensity::High, 250.0, 1)
        },
        Workout {
            description: Some("Relaxing yoga for flexibility".to_string()),
            ..workout("Yoga Session", WorkoutType::Flexibility, 60, Intensity::Low, 150.0, 0)
        },
    ]
}

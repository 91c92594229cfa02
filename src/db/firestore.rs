// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts and body profile)
//! - Meals (nutrition log entries)
//! - Workouts (exercise log entries)

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use serde::{de::DeserializeOwned, Deserialize};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Meal, Role, User, Workout};
use crate::time_utils::format_utc_rfc3339;

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Filters for listing meal or workout entries.
///
/// Every field is optional; unset fields don't constrain the result.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Restrict to one owner. `None` lists entries across all users.
    pub user_id: Option<String>,
    /// Inclusive lower bound on `date`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date`
    pub end: Option<DateTime<Utc>>,
    /// Stored value of the entry's type field (`meal_type` / `workout_type`)
    pub entry_type: Option<&'static str>,
}

impl EntryQuery {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Self::default()
        }
    }
}

/// Result row of a count aggregation.
#[derive(Debug, Deserialize)]
struct DocumentCount {
    count: usize,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator doesn't need (or want) real credentials.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJmaXRzeW5jIn0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by (already normalized) email address.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// All users, newest account first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of accounts holding `role`.
    pub async fn count_users_with_role(&self, role: Role) -> Result<usize, AppError> {
        self.count_documents(collections::USERS, Some(("role", role.as_str())))
            .await
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Meal Operations ─────────────────────────────────────────

    pub async fn get_meal(&self, meal_id: &str) -> Result<Option<Meal>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MEALS)
            .obj()
            .one(meal_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List meals matching `query`, most recent first.
    pub async fn list_meals(&self, query: &EntryQuery) -> Result<Vec<Meal>, AppError> {
        self.query_entries(collections::MEALS, "meal_type", query)
            .await
    }

    /// Create or replace a meal.
    pub async fn set_meal(&self, meal: &Meal) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MEALS)
            .document_id(&meal.id)
            .object(meal)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn delete_meal(&self, meal_id: &str) -> Result<(), AppError> {
        self.delete_document(collections::MEALS, meal_id).await
    }

    /// Number of meals across all users.
    pub async fn count_meals(&self) -> Result<usize, AppError> {
        self.count_documents(collections::MEALS, None).await
    }

    /// Store many meals with bounded concurrency.
    pub async fn batch_set_meals(&self, meals: &[Meal]) -> Result<(), AppError> {
        stream::iter(meals)
            .map(|meal| self.set_meal(meal))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect()
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List workouts matching `query`, most recent first.
    pub async fn list_workouts(&self, query: &EntryQuery) -> Result<Vec<Workout>, AppError> {
        self.query_entries(collections::WORKOUTS, "workout_type", query)
            .await
    }

    /// Create or replace a workout.
    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.delete_document(collections::WORKOUTS, workout_id)
            .await
    }

    /// Number of workouts across all users.
    pub async fn count_workouts(&self) -> Result<usize, AppError> {
        self.count_documents(collections::WORKOUTS, None).await
    }

    /// Store many workouts with bounded concurrency.
    pub async fn batch_set_workouts(&self, workouts: &[Workout]) -> Result<(), AppError> {
        stream::iter(workouts)
            .map(|workout| self.set_workout(workout))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect()
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Server-side count of documents, optionally restricted to `field == value`.
    async fn count_documents(
        &self,
        collection: &str,
        field_eq: Option<(&str, &str)>,
    ) -> Result<usize, AppError> {
        let counts: Vec<DocumentCount> = self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(|q| q.for_all([field_eq.and_then(|(field, value)| q.field(field).eq(value))]))
            .aggregate(|a| a.fields([a.field("count").count()]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(counts.first().map_or(0, |c| c.count))
    }

    /// Shared range/type/owner query for the log collections.
    async fn query_entries<T>(
        &self,
        collection: &str,
        type_field: &'static str,
        query: &EntryQuery,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let user_id = query.user_id.clone();
        let start = query.start.map(format_utc_rfc3339);
        let end = query.end.map(format_utc_rfc3339);
        let entry_type = query.entry_type;

        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| {
                q.for_all([
                    user_id
                        .as_deref()
                        .and_then(|id| q.field("user_id").eq(id)),
                    start
                        .as_deref()
                        .and_then(|s| q.field("date").greater_than_or_equal(s)),
                    end.as_deref()
                        .and_then(|e| q.field("date").less_than_or_equal(e)),
                    entry_type.and_then(|t| q.field(type_field).eq(t)),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── Account Deletion ──────────────────────────────────────────

    /// Delete a user and every meal and workout they own.
    ///
    /// Entries go first so a failure part way through never leaves
    /// entries pointing at a missing user.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        let meals = self.list_meals(&EntryQuery::for_user(user_id)).await?;
        self.batch_delete(&meals, collections::MEALS, |meal: &Meal| meal.id.clone())
            .await?;
        deleted_count += meals.len();
        tracing::debug!(user_id, count = meals.len(), "Deleted meals");

        let workouts = self.list_workouts(&EntryQuery::for_user(user_id)).await?;
        self.batch_delete(&workouts, collections::WORKOUTS, |workout: &Workout| {
            workout.id.clone()
        })
        .await?;
        deleted_count += workouts.len();
        tracing::debug!(user_id, count = workouts.len(), "Deleted workouts");

        self.delete_document(collections::USERS, user_id).await?;
        deleted_count += 1;

        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}

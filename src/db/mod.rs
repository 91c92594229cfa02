//! Database layer (Firestore).

pub mod firestore;

pub use firestore::{EntryQuery, FirestoreDb};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const MEALS: &str = "meals";
    pub const WORKOUTS: &str = "workouts";
}

// ABOUTME: Database handle and schema management for the workout logging core
// ABOUTME: Owns the SQLite pool and fans migration out to the per-entity modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! This module provides the storage layer for the workout logging core: the
//! shared [`Database`] handle, schema migrations, and the per-entity accessor
//! managers. Every query against user-owned rows carries the ownership chain
//! in its predicate so that one user can never observe or alter another
//! user's data.

mod exercises;
mod sets;
pub mod test_utils;
mod workout_exercises;
mod workouts;

pub use exercises::{seed_exercise_catalog, ExerciseCatalog, DEFAULT_EXERCISES};
pub use sets::{LogSetRequest, SetsManager};
pub use workout_exercises::WorkoutExercisesManager;
pub use workouts::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutsManager};

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

/// Database manager for workout, exercise, and set storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_workout_exercises().await?;
        self.migrate_sets().await?;

        info!("database migrations complete");
        Ok(())
    }
}

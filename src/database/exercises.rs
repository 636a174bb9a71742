// ABOUTME: Exercise catalog access and seeding
// ABOUTME: The catalog is global and read-only for users; no authorization applies
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Exercise;
use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Default catalog installed into an empty database
pub const DEFAULT_EXERCISES: &[&str] = &[
    "Barbell Row",
    "Bench Press",
    "Bicep Curl",
    "Deadlift",
    "Lat Pulldown",
    "Leg Press",
    "Overhead Press",
    "Pull Up",
    "Romanian Deadlift",
    "Squat",
];

impl Database {
    /// Create the exercises table
    pub(super) async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

/// Insert the default exercise catalog, skipping names that already exist.
///
/// Safe to run repeatedly; re-seeding an already seeded database is a no-op.
///
/// # Errors
///
/// Returns an error if a database operation fails
pub async fn seed_exercise_catalog(pool: &SqlitePool) -> AppResult<u64> {
    let mut inserted = 0;
    for name in DEFAULT_EXERCISES {
        let result = sqlx::query("INSERT OR IGNORE INTO exercises (id, name) VALUES ($1, $2)")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed exercise catalog: {e}")))?;
        inserted += result.rows_affected();
    }

    debug!(inserted, "exercise catalog seeded");
    Ok(inserted)
}

/// Read accessor for the global exercise catalog.
///
/// The catalog is shared by all users, so unlike the other managers this one
/// performs no identity resolution.
pub struct ExerciseCatalog {
    pool: SqlitePool,
}

impl ExerciseCatalog {
    /// Create a new catalog accessor
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all exercises, sorted by name ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT id, name FROM exercises ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Look up a single exercise by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, exercise_id: Uuid) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT id, name FROM exercises WHERE id = $1")
            .bind(exercise_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

        row.as_ref().map(row_to_exercise).transpose()
    }
}

/// Convert a database row to an `Exercise`
fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let id: String = row.get("id");
    Ok(Exercise {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid exercise id: {e}")))?,
        name: row.get("name"),
    })
}

// ABOUTME: Workout CRUD accessor with per-user isolation
// ABOUTME: Reads re-derive the caller identity; mutations are ownership-predicated
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::auth::{require_user, SharedIdentity};
use crate::errors::{AppError, AppResult};
use crate::models::Workout;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

impl Database {
    /// Create the workouts table
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                started_at DATETIME NOT NULL,
                completed_at DATETIME,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_started ON workouts(user_id, started_at)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// Request to create a new workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    /// User-supplied workout name
    pub name: String,
    /// When the workout was started
    pub started_at: DateTime<Utc>,
}

/// Request to update an existing workout's mutable fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New name (if provided)
    pub name: Option<String>,
    /// New start time (if provided)
    pub started_at: Option<DateTime<Utc>>,
}

/// Workout database operations manager.
///
/// Read operations resolve the caller through the identity provider before
/// querying; mutations take the pre-authorized `user_id` and still carry the
/// ownership predicate, so a mismatched caller affects zero rows and is
/// reported as not-found.
pub struct WorkoutsManager {
    pool: SqlitePool,
    identity: SharedIdentity,
}

impl WorkoutsManager {
    /// Create a new workouts manager
    #[must_use]
    pub fn new(pool: SqlitePool, identity: SharedIdentity) -> Self {
        Self { pool, identity }
    }

    /// List the caller's workouts, most recently started first.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no identity resolves, or a database error.
    pub async fn list(&self) -> AppResult<Vec<Workout>> {
        let user_id = require_user(self.identity.as_ref()).await?;
        self.list_for_user(user_id).await
    }

    /// List the caller's workouts whose `started_at` falls on `date` in local
    /// time, inclusive of the whole day `[00:00:00.000, 23:59:59.999]`.
    ///
    /// Filtering happens after fetching the user's list; at this system's
    /// scale one user's workout history is small.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no identity resolves, or a database error.
    pub async fn list_on_date(&self, date: NaiveDate) -> AppResult<Vec<Workout>> {
        let workouts = self.list().await?;
        Ok(workouts
            .into_iter()
            .filter(|w| falls_on_local_day(w.started_at, date))
            .collect())
    }

    /// Get one workout by id, scoped to the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no identity resolves, `ResourceNotFound`
    /// when the workout does not exist or belongs to another user (the two
    /// cases are indistinguishable by design), or a database error.
    pub async fn get(&self, workout_id: Uuid) -> AppResult<Workout> {
        let user_id = require_user(self.identity.as_ref()).await?;

        let row = sqlx::query(
            r"
            SELECT id, user_id, name, started_at, completed_at, created_at, updated_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.as_ref()
            .map(row_to_workout)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))
    }

    /// Create a new workout for `user_id` with `completed_at` unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(&self, user_id: Uuid, request: &CreateWorkoutRequest) -> AppResult<Workout> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, name, started_at, completed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL, $5, $5)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&request.name)
        .bind(request.started_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        debug!(workout_id = %id, "workout created");

        Ok(Workout {
            id,
            user_id,
            name: request.name.clone(),
            started_at: request.started_at,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Mark a workout completed, conditioned on ownership.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the ownership predicate matches zero
    /// rows (missing or foreign workout), or a database error.
    pub async fn complete(&self, workout_id: Uuid, user_id: Uuid) -> AppResult<Workout> {
        let now = Utc::now();

        let row = sqlx::query(
            r"
            UPDATE workouts
            SET completed_at = $3, updated_at = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, started_at, completed_at, created_at, updated_at
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to complete workout: {e}")))?;

        row.as_ref()
            .map(row_to_workout)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))
    }

    /// Partially update a workout's mutable fields, conditioned on ownership.
    ///
    /// Omitted fields keep their prior values; `updated_at` is always bumped.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the ownership predicate matches zero
    /// rows, or a database error.
    pub async fn update(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
        request: &UpdateWorkoutRequest,
    ) -> AppResult<Workout> {
        let now = Utc::now();

        let row = sqlx::query(
            r"
            UPDATE workouts
            SET name = COALESCE($3, name),
                started_at = COALESCE($4, started_at),
                updated_at = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, started_at, completed_at, created_at, updated_at
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(&request.name)
        .bind(request.started_at)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        row.as_ref()
            .map(row_to_workout)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))
    }

    /// Internal list implementation shared by the read paths
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, started_at, completed_at, created_at, updated_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY started_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }
}

/// Whether `ts` falls within the local-time day `date`, i.e. within the
/// inclusive window `[date 00:00:00.000, date 23:59:59.999]`.
fn falls_on_local_day(ts: DateTime<Utc>, date: NaiveDate) -> bool {
    ts.with_timezone(&Local).date_naive() == date
}

/// Convert a database row to a `Workout`
fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");

    Ok(Workout {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid workout id: {e}")))?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("Invalid user id: {e}")))?,
        name: row.get("name"),
        started_at: row.get("started_at"),
        completed_at: row.get("completed_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_falls_on_local_day_boundaries() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let last_milli = Local
            .with_ymd_and_hms(2024, 3, 15, 23, 59, 59)
            .unwrap()
            .with_timezone(&Utc)
            + chrono::Duration::milliseconds(999);
        assert!(falls_on_local_day(last_milli, date));

        let next_midnight = Local
            .with_ymd_and_hms(2024, 3, 16, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert!(!falls_on_local_day(next_midnight, date));

        let first_milli = Local
            .with_ymd_and_hms(2024, 3, 15, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert!(falls_on_local_day(first_milli, date));
    }
}

// ABOUTME: Set accessor: list, upsert-like logging, and deletion of individual sets
// ABOUTME: Ownership is established transitively through workout_exercises -> workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::auth::{require_user, SharedIdentity};
use crate::errors::{AppError, AppResult};
use crate::models::SetEntry;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

impl Database {
    /// Create the sets table
    pub(super) async fn migrate_sets(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sets (
                id TEXT PRIMARY KEY,
                workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
                set_number INTEGER NOT NULL,
                weight TEXT,
                reps INTEGER
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sets_workout_exercise ON sets(workout_exercise_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// Request for the upsert-like set logging operation.
///
/// Without `set_id` a new set is created and `set_number` is required (the
/// caller picks it, typically current count + 1). With `set_id` only the
/// fields that are present change; omitted fields keep their prior values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSetRequest {
    /// Parent workout-exercise
    pub workout_exercise_id: Uuid,
    /// Existing set to update; absent means create
    pub set_id: Option<Uuid>,
    /// Ordinal for a newly created set; ignored on update
    pub set_number: Option<i64>,
    /// Weight as a decimal string
    pub weight: Option<String>,
    /// Repetition count
    pub reps: Option<i64>,
}

/// Set database operations manager
pub struct SetsManager {
    pool: SqlitePool,
    identity: SharedIdentity,
}

impl SetsManager {
    /// Create a new sets manager
    #[must_use]
    pub fn new(pool: SqlitePool, identity: SharedIdentity) -> Self {
        Self { pool, identity }
    }

    /// List the sets of a workout-exercise in ascending `set_number` order.
    ///
    /// Ownership is checked transitively: the join reaches the parent workout
    /// and filters on the caller's user id, so a foreign workout-exercise
    /// simply yields nothing.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no identity resolves, or a database error.
    pub async fn list(&self, workout_exercise_id: Uuid) -> AppResult<Vec<SetEntry>> {
        let user_id = require_user(self.identity.as_ref()).await?;

        let rows = sqlx::query(
            r"
            SELECT s.id, s.workout_exercise_id, s.set_number, s.weight, s.reps
            FROM sets s
            INNER JOIN workout_exercises we ON s.workout_exercise_id = we.id
            INNER JOIN workouts w ON we.workout_id = w.id
            WHERE s.workout_exercise_id = $1 AND w.user_id = $2
            ORDER BY s.set_number ASC
            ",
        )
        .bind(workout_exercise_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sets: {e}")))?;

        rows.iter().map(row_to_set).collect()
    }

    /// Log a set: create when `set_id` is absent, partially update when
    /// present. Returns the persisted row.
    ///
    /// Creation always inserts a new row, even when weight and reps happen to
    /// match an existing one. Updates change only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when creating without a `set_number`,
    /// `ResourceNotFound` when the ownership chain cannot be established, or
    /// a database error.
    pub async fn log(&self, user_id: Uuid, request: &LogSetRequest) -> AppResult<SetEntry> {
        match request.set_id {
            Some(set_id) => self.update_set(set_id, user_id, request).await,
            None => self.create_set(user_id, request).await,
        }
    }

    /// Delete a set, predicated on the ownership chain.
    ///
    /// Idempotent: a missing or unreachable id affects zero rows and is Ok.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, set_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM sets
            WHERE id = $1
              AND workout_exercise_id IN (
                  SELECT we.id
                  FROM workout_exercises we
                  INNER JOIN workouts w ON we.workout_id = w.id
                  WHERE w.user_id = $2
              )
            ",
        )
        .bind(set_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete set: {e}")))?;

        debug!(%set_id, rows = result.rows_affected(), "set deleted");
        Ok(())
    }

    async fn create_set(&self, user_id: Uuid, request: &LogSetRequest) -> AppResult<SetEntry> {
        let set_number = request
            .set_number
            .ok_or_else(|| AppError::invalid_input("set_number is required when creating a set"))?;

        self.verify_chain_ownership(request.workout_exercise_id, user_id)
            .await?;

        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO sets (id, workout_exercise_id, set_number, weight, reps)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.to_string())
        .bind(request.workout_exercise_id.to_string())
        .bind(set_number)
        .bind(&request.weight)
        .bind(request.reps)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create set: {e}")))?;

        debug!(set_id = %id, set_number, "set logged");

        Ok(SetEntry {
            id,
            workout_exercise_id: request.workout_exercise_id,
            set_number,
            weight: request.weight.clone(),
            reps: request.reps,
        })
    }

    async fn update_set(
        &self,
        set_id: Uuid,
        user_id: Uuid,
        request: &LogSetRequest,
    ) -> AppResult<SetEntry> {
        let row = sqlx::query(
            r"
            UPDATE sets
            SET weight = COALESCE($4, weight),
                reps = COALESCE($5, reps)
            WHERE id = $1
              AND workout_exercise_id = $2
              AND workout_exercise_id IN (
                  SELECT we.id
                  FROM workout_exercises we
                  INNER JOIN workouts w ON we.workout_id = w.id
                  WHERE w.user_id = $3
              )
            RETURNING id, workout_exercise_id, set_number, weight, reps
            ",
        )
        .bind(set_id.to_string())
        .bind(request.workout_exercise_id.to_string())
        .bind(user_id.to_string())
        .bind(&request.weight)
        .bind(request.reps)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update set: {e}")))?;

        row.as_ref()
            .map(row_to_set)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("set {set_id}")))
    }

    /// Fail with not-found unless the workout-exercise is reachable through
    /// one of the caller's workouts
    async fn verify_chain_ownership(
        &self,
        workout_exercise_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        let exists: Option<i64> = sqlx::query_scalar(
            r"
            SELECT 1
            FROM workout_exercises we
            INNER JOIN workouts w ON we.workout_id = w.id
            WHERE we.id = $1 AND w.user_id = $2
            ",
        )
        .bind(workout_exercise_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to verify set ownership: {e}")))?;

        if exists.is_some() {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "workout exercise {workout_exercise_id}"
            )))
        }
    }
}

/// Convert a database row to a `SetEntry`
fn row_to_set(row: &SqliteRow) -> AppResult<SetEntry> {
    let id: String = row.get("id");
    let workout_exercise_id: String = row.get("workout_exercise_id");

    Ok(SetEntry {
        id: Uuid::parse_str(&id).map_err(|e| AppError::database(format!("Invalid set id: {e}")))?,
        workout_exercise_id: Uuid::parse_str(&workout_exercise_id)
            .map_err(|e| AppError::database(format!("Invalid workout exercise id: {e}")))?,
        set_number: row.get("set_number"),
        weight: row.get("weight"),
        reps: row.get("reps"),
    })
}

// ABOUTME: Workout-exercise join accessor: attach/detach exercises and the aggregated read
// ABOUTME: list_with_sets folds the ordered join rows into per-exercise groups with nested sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::auth::{require_user, SharedIdentity};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, SetEntry, WorkoutExercise, WorkoutExerciseWithSets};
use anyhow::Result;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

impl Database {
    /// Create the workout_exercises table
    pub(super) async fn migrate_workout_exercises(&self) -> Result<()> {
        // `position` holds the display/logging order; `order` is a SQL keyword
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                position INTEGER NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// Accessor for the workout ↔ exercise join.
///
/// The same exercise may appear in a workout more than once; each attachment
/// gets its own row and position.
pub struct WorkoutExercisesManager {
    pool: SqlitePool,
    identity: SharedIdentity,
}

impl WorkoutExercisesManager {
    /// Create a new workout-exercises manager
    #[must_use]
    pub fn new(pool: SqlitePool, identity: SharedIdentity) -> Self {
        Self { pool, identity }
    }

    /// Attach an exercise to a workout at an explicit position.
    ///
    /// Ownership of the workout is verified here rather than trusted from the
    /// caller; a missing or foreign workout reports not-found.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the workout is missing or owned by
    /// another user, or a database error.
    pub async fn add(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        user_id: Uuid,
        order: i64,
    ) -> AppResult<WorkoutExercise> {
        self.verify_workout_ownership(workout_id, user_id).await?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO workout_exercises (id, workout_id, exercise_id, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(id.to_string())
        .bind(workout_id.to_string())
        .bind(exercise_id.to_string())
        .bind(order)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add exercise to workout: {e}")))?;

        debug!(workout_exercise_id = %id, %workout_id, "exercise attached to workout");

        Ok(WorkoutExercise {
            id,
            workout_id,
            exercise_id,
            order,
        })
    }

    /// Attach an exercise at the next free position (current attachment count).
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the workout is missing or owned by
    /// another user, or a database error.
    pub async fn add_next(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<WorkoutExercise> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workout_exercises WHERE workout_id = $1")
                .bind(workout_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to count workout exercises: {e}"))
                })?;

        self.add(workout_id, exercise_id, user_id, count).await
    }

    /// Detach a workout-exercise; its sets go with it via the storage cascade.
    ///
    /// Idempotent: removing an id that does not exist (or is not reachable
    /// through the caller's workouts) affects zero rows and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn remove(&self, workout_exercise_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM workout_exercises
            WHERE id = $1
              AND workout_id IN (SELECT id FROM workouts WHERE user_id = $2)
            ",
        )
        .bind(workout_exercise_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove exercise from workout: {e}")))?;

        debug!(
            %workout_exercise_id,
            rows = result.rows_affected(),
            "workout exercise removed"
        );
        Ok(())
    }

    /// The central aggregated read: each workout-exercise of `workout_id`
    /// with its catalog exercise and logged sets.
    ///
    /// One joined query (ownership through the workout, LEFT JOIN on sets so
    /// exercises without sets still appear), ordered by position then set
    /// number, then a single-pass fold grouping rows by workout-exercise id.
    /// Group order is the first-seen row order, kept explicitly via an index
    /// map rather than relying on any map iteration order.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no identity resolves, or a database error.
    pub async fn list_with_sets(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExerciseWithSets>> {
        let user_id = require_user(self.identity.as_ref()).await?;

        let rows = sqlx::query(
            r"
            SELECT we.id          AS workout_exercise_id,
                   we.workout_id  AS workout_id,
                   we.position    AS position,
                   e.id           AS exercise_id,
                   e.name         AS exercise_name,
                   s.id           AS set_id,
                   s.set_number   AS set_number,
                   s.weight       AS weight,
                   s.reps         AS reps
            FROM workout_exercises we
            INNER JOIN workouts w ON we.workout_id = w.id
            INNER JOIN exercises e ON we.exercise_id = e.id
            LEFT JOIN sets s ON s.workout_exercise_id = we.id
            WHERE we.workout_id = $1 AND w.user_id = $2
            ORDER BY we.position ASC, s.set_number ASC
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load workout exercises: {e}")))?;

        let mut grouped: Vec<WorkoutExerciseWithSets> = Vec::new();
        let mut index_by_id: HashMap<Uuid, usize> = HashMap::new();

        for row in &rows {
            let we_id = parse_uuid(row.get("workout_exercise_id"))?;

            let slot = if let Some(&i) = index_by_id.get(&we_id) {
                i
            } else {
                let exercise_id = parse_uuid(row.get("exercise_id"))?;
                grouped.push(WorkoutExerciseWithSets {
                    id: we_id,
                    workout_id: parse_uuid(row.get("workout_id"))?,
                    exercise_id,
                    order: row.get("position"),
                    exercise: Exercise {
                        id: exercise_id,
                        name: row.get("exercise_name"),
                    },
                    sets: Vec::new(),
                });
                index_by_id.insert(we_id, grouped.len() - 1);
                grouped.len() - 1
            };

            // LEFT JOIN: a workout-exercise without sets yields NULL set
            // columns, which must not become a placeholder entry
            if let Some(set_id) = row.get::<Option<String>, _>("set_id") {
                grouped[slot].sets.push(SetEntry {
                    id: parse_uuid(set_id)?,
                    workout_exercise_id: we_id,
                    set_number: row.get("set_number"),
                    weight: row.get("weight"),
                    reps: row.get("reps"),
                });
            }
        }

        Ok(grouped)
    }

    /// Fail with not-found unless `workout_id` exists and belongs to `user_id`
    async fn verify_workout_ownership(&self, workout_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM workouts WHERE id = $1 AND user_id = $2")
                .bind(workout_id.to_string())
                .bind(user_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to verify workout ownership: {e}"))
                })?;

        if exists.is_some() {
            Ok(())
        } else {
            Err(AppError::not_found(format!("workout {workout_id}")))
        }
    }
}

fn parse_uuid(value: String) -> AppResult<Uuid> {
    Uuid::parse_str(&value).map_err(|e| AppError::database(format!("Invalid id in row: {e}")))
}

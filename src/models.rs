// ABOUTME: Core data structures for workouts, exercises, and logged sets
// ABOUTME: Serde-derived row types shared by the database accessors and their callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data models for the workout logging domain.
//!
//! Every user-owned row (`Workout`, and transitively `WorkoutExercise` and
//! `SetEntry`) is reachable only through an ownership chain ending at a
//! `Workout` whose `user_id` matches the requesting identity; the accessors in
//! [`crate::database`] enforce that chain on every query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry in the global exercise catalog.
///
/// Exercises are shared across all users and immutable from this core's
/// perspective; no create/update/delete is exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Display name, unique within the catalog
    pub name: String,
}

/// A single workout session owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// User-supplied name, e.g. "Push Day"
    pub name: String,
    /// When the workout was started
    pub started_at: DateTime<Utc>,
    /// When the workout was completed; `None` means in progress
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Whether this workout is still in progress
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        self.completed_at.is_none()
    }
}

/// Join entity linking a workout to an exercise from the catalog.
///
/// A workout may contain the same exercise more than once; `order` establishes
/// the display and logging sequence within the workout and is not required to
/// be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique identifier
    pub id: Uuid,
    /// Parent workout
    pub workout_id: Uuid,
    /// Referenced catalog exercise
    pub exercise_id: Uuid,
    /// Display/logging position within the workout
    pub order: i64,
}

/// One logged set (weight x reps) belonging to a workout-exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Parent workout-exercise
    pub workout_exercise_id: Uuid,
    /// User-visible ordinal within the parent; typically increments by one
    pub set_number: i64,
    /// Weight as a decimal string (kept as text to avoid float rounding)
    pub weight: Option<String>,
    /// Repetition count
    pub reps: Option<i64>,
}

/// A workout-exercise joined with its catalog exercise and logged sets.
///
/// Produced by the aggregating read in
/// [`crate::database::WorkoutExercisesManager::list_with_sets`]; `sets` is
/// ordered by `set_number` and empty when nothing has been logged yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutExerciseWithSets {
    /// Unique identifier of the workout-exercise row
    pub id: Uuid,
    /// Parent workout
    pub workout_id: Uuid,
    /// Referenced catalog exercise
    pub exercise_id: Uuid,
    /// Display/logging position within the workout
    pub order: i64,
    /// The joined catalog exercise
    pub exercise: Exercise,
    /// Logged sets in ascending `set_number` order
    pub sets: Vec<SetEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_workout_in_progress() {
        let mut workout = Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Push Day".into(),
            started_at: Utc::now(),
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(workout.is_in_progress());

        workout.completed_at = Some(Utc::now());
        assert!(!workout.is_in_progress());
    }

    #[test]
    fn test_set_entry_serde_round_trip() {
        let set = SetEntry {
            id: Uuid::new_v4(),
            workout_exercise_id: Uuid::new_v4(),
            set_number: 1,
            weight: Some("60.5".into()),
            reps: Some(10),
        };
        let json = serde_json::to_string(&set).unwrap();
        let back: SetEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}

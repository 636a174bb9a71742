// ABOUTME: Integration tests for the workout-exercise join accessor
// ABOUTME: Covers add/remove, cascade deletion, and the aggregated list_with_sets read
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use chrono::Utc;
use common::{exercise_id_by_name, identity_for, setup_seeded_db};
use ironlog::database::{
    CreateWorkoutRequest, Database, LogSetRequest, SetsManager, WorkoutExercisesManager,
    WorkoutsManager,
};
use ironlog::errors::ErrorCode;
use ironlog::models::Workout;
use uuid::Uuid;

async fn create_workout(db: &Database, user: Uuid, name: &str) -> Workout {
    WorkoutsManager::new(db.pool().clone(), identity_for(user))
        .create(
            user,
            &CreateWorkoutRequest {
                name: name.into(),
                started_at: Utc::now(),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_returns_the_persisted_row() {
    let db = setup_seeded_db().await;
    let user = Uuid::new_v4();
    let workout = create_workout(&db, user, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(user));
    let attached = manager.add(workout.id, bench, user, 0).await.unwrap();

    assert_eq!(attached.workout_id, workout.id);
    assert_eq!(attached.exercise_id, bench);
    assert_eq!(attached.order, 0);
}

#[tokio::test]
async fn test_add_verifies_workout_ownership() {
    let db = setup_seeded_db().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let workout = create_workout(&db, owner, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(intruder));
    let err = manager.add(workout.id, bench, intruder, 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = manager
        .add(Uuid::new_v4(), bench, intruder, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_add_next_uses_the_attachment_count() {
    let db = setup_seeded_db().await;
    let user = Uuid::new_v4();
    let workout = create_workout(&db, user, "Full Body").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;
    let squat = exercise_id_by_name(&db, "Squat").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(user));
    let first = manager.add_next(workout.id, bench, user).await.unwrap();
    let second = manager.add_next(workout.id, squat, user).await.unwrap();

    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
}

#[tokio::test]
async fn test_same_exercise_can_appear_twice() {
    let db = setup_seeded_db().await;
    let user = Uuid::new_v4();
    let workout = create_workout(&db, user, "Squat Day").await;
    let squat = exercise_id_by_name(&db, "Squat").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(user));
    let first = manager.add_next(workout.id, squat, user).await.unwrap();
    let second = manager.add_next(workout.id, squat, user).await.unwrap();
    assert_ne!(first.id, second.id);

    let listed = manager.list_with_sets(workout.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|we| we.exercise.name == "Squat"));
}

#[tokio::test]
async fn test_remove_is_idempotent_and_cascades_to_sets() {
    let db = setup_seeded_db().await;
    let user = Uuid::new_v4();
    let workout = create_workout(&db, user, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(user));
    let attached = manager.add_next(workout.id, bench, user).await.unwrap();

    let sets = SetsManager::new(db.pool().clone(), identity_for(user));
    sets.log(
        user,
        &LogSetRequest {
            workout_exercise_id: attached.id,
            set_id: None,
            set_number: Some(1),
            weight: Some("60".into()),
            reps: Some(10),
        },
    )
    .await
    .unwrap();

    manager.remove(attached.id, user).await.unwrap();
    assert!(manager.list_with_sets(workout.id).await.unwrap().is_empty());

    // Storage-layer cascade removed the orphaned sets
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sets WHERE workout_exercise_id = $1")
        .bind(attached.id.to_string())
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    // Removing again is not an error
    manager.remove(attached.id, user).await.unwrap();
    // Nor is removing an id that never existed
    manager.remove(Uuid::new_v4(), user).await.unwrap();
}

#[tokio::test]
async fn test_remove_does_not_cross_user_boundaries() {
    let db = setup_seeded_db().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let workout = create_workout(&db, owner, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;

    let as_owner = WorkoutExercisesManager::new(db.pool().clone(), identity_for(owner));
    let attached = as_owner.add_next(workout.id, bench, owner).await.unwrap();

    // A foreign caller's remove matches zero rows; the attachment survives
    let as_intruder = WorkoutExercisesManager::new(db.pool().clone(), identity_for(intruder));
    as_intruder.remove(attached.id, intruder).await.unwrap();

    assert_eq!(as_owner.list_with_sets(workout.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_with_sets_orders_and_groups() {
    let db = setup_seeded_db().await;
    let user = Uuid::new_v4();
    let workout = create_workout(&db, user, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;
    let press = exercise_id_by_name(&db, "Overhead Press").await;

    let manager = WorkoutExercisesManager::new(db.pool().clone(), identity_for(user));
    let first = manager.add(workout.id, bench, user, 0).await.unwrap();
    let second = manager.add(workout.id, press, user, 1).await.unwrap();

    // Log the bench sets out of order; the read must sort by set_number
    let sets = SetsManager::new(db.pool().clone(), identity_for(user));
    for (number, weight, reps) in [(2, "65", 8), (1, "60", 10)] {
        sets.log(
            user,
            &LogSetRequest {
                workout_exercise_id: first.id,
                set_id: None,
                set_number: Some(number),
                weight: Some(weight.into()),
                reps: Some(reps),
            },
        )
        .await
        .unwrap();
    }

    let listed = manager.list_with_sets(workout.id).await.unwrap();
    assert_eq!(listed.len(), 2);

    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[0].order, 0);
    assert_eq!(listed[0].exercise.name, "Bench Press");
    let numbers: Vec<i64> = listed[0].sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, [1, 2]);
    assert_eq!(listed[0].sets[0].weight.as_deref(), Some("60"));
    assert_eq!(listed[0].sets[0].reps, Some(10));

    // The second exercise has no sets yet: present, with an empty sets vec
    assert_eq!(listed[1].id, second.id);
    assert_eq!(listed[1].order, 1);
    assert_eq!(listed[1].exercise.name, "Overhead Press");
    assert!(listed[1].sets.is_empty());
}

#[tokio::test]
async fn test_list_with_sets_is_empty_for_foreign_workout() {
    let db = setup_seeded_db().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let workout = create_workout(&db, owner, "Push Day").await;
    let bench = exercise_id_by_name(&db, "Bench Press").await;

    WorkoutExercisesManager::new(db.pool().clone(), identity_for(owner))
        .add_next(workout.id, bench, owner)
        .await
        .unwrap();

    let as_intruder = WorkoutExercisesManager::new(db.pool().clone(), identity_for(intruder));
    assert!(as_intruder
        .list_with_sets(workout.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_with_sets_requires_identity() {
    let db = setup_seeded_db().await;
    let manager =
        WorkoutExercisesManager::new(db.pool().clone(), common::anonymous_identity());

    let err = manager.list_with_sets(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

// ABOUTME: Integration tests for the global exercise catalog
// ABOUTME: Covers name ordering, lookup, and idempotent seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{setup_db, setup_seeded_db};
use ironlog::database::{seed_exercise_catalog, ExerciseCatalog, DEFAULT_EXERCISES};
use uuid::Uuid;

#[tokio::test]
async fn test_list_is_sorted_by_name_ascending() {
    let db = setup_seeded_db().await;
    let catalog = ExerciseCatalog::new(db.pool().clone());

    let exercises = catalog.list().await.unwrap();
    assert_eq!(exercises.len(), DEFAULT_EXERCISES.len());

    let names: Vec<&str> = exercises.iter().map(|e| e.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = setup_db().await;

    let first = seed_exercise_catalog(db.pool()).await.unwrap();
    assert_eq!(first, DEFAULT_EXERCISES.len() as u64);

    let second = seed_exercise_catalog(db.pool()).await.unwrap();
    assert_eq!(second, 0);

    let catalog = ExerciseCatalog::new(db.pool().clone());
    assert_eq!(catalog.list().await.unwrap().len(), DEFAULT_EXERCISES.len());
}

#[tokio::test]
async fn test_get_by_id() {
    let db = setup_seeded_db().await;
    let catalog = ExerciseCatalog::new(db.pool().clone());

    let bench = catalog
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.name == "Bench Press")
        .unwrap();

    let fetched = catalog.get(bench.id).await.unwrap().unwrap();
    assert_eq!(fetched, bench);

    assert!(catalog.get(Uuid::new_v4()).await.unwrap().is_none());
}

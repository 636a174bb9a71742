// ABOUTME: Shared fixtures for the integration tests
// ABOUTME: In-memory database setup, identity helpers, and catalog lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used, dead_code)]

use ironlog::auth::{SharedIdentity, StaticIdentity};
use ironlog::database::{seed_exercise_catalog, Database, ExerciseCatalog};
use std::sync::Arc;
use uuid::Uuid;

/// Fresh in-memory database with migrations applied
pub async fn setup_db() -> Database {
    ironlog::database::test_utils::create_test_db()
        .await
        .unwrap()
}

/// Fresh in-memory database with the default exercise catalog seeded
pub async fn setup_seeded_db() -> Database {
    let db = setup_db().await;
    seed_exercise_catalog(db.pool()).await.unwrap();
    db
}

/// Identity provider that resolves to `user_id`
pub fn identity_for(user_id: Uuid) -> SharedIdentity {
    Arc::new(StaticIdentity::authenticated(user_id))
}

/// Identity provider that never resolves
pub fn anonymous_identity() -> SharedIdentity {
    Arc::new(StaticIdentity::anonymous())
}

/// Look up a seeded catalog exercise id by name
pub async fn exercise_id_by_name(db: &Database, name: &str) -> Uuid {
    let catalog = ExerciseCatalog::new(db.pool().clone());
    catalog
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.name == name)
        .unwrap()
        .id
}

// ABOUTME: Main library entry point for the Ironlog workout logging core
// ABOUTME: Exposes the database accessors, identity seam, and error system
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Ironlog
//!
//! The data-access core of a personal workout logger: users record workouts,
//! attach exercises from a shared catalog, and log sets (weight × reps) per
//! exercise, organized by calendar date.
//!
//! ## Architecture
//!
//! - **Models**: row types for workouts, exercises, workout-exercises, sets
//! - **Database**: SQLite storage with per-entity accessor managers
//! - **Auth**: the identity-provider seam and the `require_user` helper
//! - **Errors**: unified `AppError`/`AppResult` with HTTP status mapping
//!
//! Read accessors re-derive the caller identity on every call; mutation
//! accessors take a pre-authorized user id and still re-verify the ownership
//! chain inside their SQL predicates, so no path trusts its caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use ironlog::auth::StaticIdentity;
//! use ironlog::database::{CreateWorkoutRequest, Database, WorkoutsManager};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Database::new("sqlite:./data/ironlog.db").await?;
//!
//!     let user_id = Uuid::new_v4();
//!     let identity = Arc::new(StaticIdentity::authenticated(user_id));
//!     let workouts = WorkoutsManager::new(db.pool().clone(), identity);
//!
//!     let workout = workouts
//!         .create(
//!             user_id,
//!             &CreateWorkoutRequest {
//!                 name: "Push Day".into(),
//!                 started_at: Utc::now(),
//!             },
//!         )
//!         .await?;
//!     println!("created workout {}", workout.id);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod models;

// ABOUTME: Test utilities for database operations and in-memory test database creation
// ABOUTME: Provides helper functions for creating isolated test database instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use anyhow::Result;

/// Create a test database instance.
///
/// Uses a simple in-memory database; each connection gets its own isolated
/// instance, so tests never observe one another.
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

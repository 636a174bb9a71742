// ABOUTME: Identity provider seam and the scoped-authorization helper
// ABOUTME: Read accessors re-derive the caller identity through require_user at entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity resolution for the accessor layer.
//!
//! The authentication system itself is an external collaborator; this crate
//! only needs one capability from it: given the current execution context,
//! produce an optional stable user identifier. Absence of an identifier means
//! the request is unauthenticated and every identity-requiring operation must
//! fail with [`AppError::auth_required`] instead of defaulting.

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque source of the current caller's identity.
///
/// Implementations wrap whatever the surrounding application uses (session
/// cookie, JWT claims, test fixture); the accessors never look inside.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The authenticated user for the current context, or `None` when
    /// unauthenticated.
    async fn current_user(&self) -> Option<Uuid>;
}

/// Shared handle to an identity provider
pub type SharedIdentity = Arc<dyn IdentityProvider>;

/// Resolve the current user or fail with `AuthRequired`.
///
/// This is the single authorization entry point for every read accessor,
/// replacing a per-call "resolve identity, throw if absent" preamble.
///
/// # Errors
///
/// Returns [`AppError::auth_required`] when the provider yields no identity.
pub async fn require_user(identity: &dyn IdentityProvider) -> AppResult<Uuid> {
    identity
        .current_user()
        .await
        .ok_or_else(AppError::auth_required)
}

/// Identity provider with a fixed answer.
///
/// Used by embedding code that has already resolved the user out of band, and
/// by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user_id: Option<Uuid>,
}

impl StaticIdentity {
    /// Provider that always resolves to `user_id`
    #[must_use]
    pub const fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Provider that never resolves an identity
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<Uuid> {
        self.user_id
    }
}

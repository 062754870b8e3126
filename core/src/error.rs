// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::{ETag, Href};

/// Errors surfaced by the calendar store.
///
/// The HTTP adapter maps these onto status codes (`NotFound` -> 404,
/// `Forbidden` -> 403, `Conflict` -> 409, `Validation` -> 400,
/// `Locked` -> 423, `PreconditionFailed` -> 412), so variants are kept
/// machine-distinguishable rather than collapsed into one string error.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed input, rejected before any state change.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The addressed resource does not exist (or is not visible to the caller).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The caller does not own the addressed resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness violation, e.g. a duplicate uid or deleting a default collection.
    #[error("conflict: {0}")]
    Conflict(String),

    /// `ETag` mismatch; the caller must re-fetch and retry with fresh state.
    #[error("precondition failed: expected {expected}, current {current}")]
    PreconditionFailed {
        /// The `ETag` the caller presented.
        expected: ETag,
        /// The `ETag` currently stored.
        current: ETag,
    },

    /// The resource is covered by an incompatible lock.
    #[error("resource is locked: {0}")]
    Locked(Href),

    /// The supplied sync token is older than the change-log retention
    /// horizon; the client must fall back to a full resync.
    #[error("sync token is no longer valid")]
    TokenInvalidated,

    /// Pool exhaustion or write contention on the underlying store; safe to
    /// retry with backoff.
    #[error("database operation timed out")]
    Timeout,

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => Self::Timeout,
            // A second writer that raced past an in-transaction existence
            // check lands on a UNIQUE constraint; that is the same conflict
            // the check reports, not an internal failure.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(db) if is_busy_or_locked(db.as_ref()) => Self::Timeout,
            e => Self::Database(e),
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including extended forms such as
/// SQLITE_BUSY_SNAPSHOT; the primary code sits in the low byte.
fn is_busy_or_locked(e: &dyn sqlx::error::DatabaseError) -> bool {
    e.code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, 5 | 6))
}

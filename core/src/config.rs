// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use crate::StoreError;

/// Configuration for the calendar store.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file. `None` opens an in-memory database,
    /// which is only suitable for tests.
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// How long change-log rows are retained before `purge_changes` may
    /// delete them. Clients holding a token older than this horizon get
    /// `TokenInvalidated` and must resync.
    #[serde(default = "default_change_retention_days")]
    pub change_retention_days: u32,

    /// Lock lifetime applied when a lock request does not carry its own
    /// timeout.
    #[serde(default = "default_lock_timeout_secs")]
    pub default_lock_timeout_secs: u32,
}

impl StoreConfig {
    /// Validates the configuration.
    pub fn normalize(&self) -> Result<(), StoreError> {
        if self.change_retention_days == 0 {
            return Err(StoreError::Validation(
                "change_retention_days must be at least 1".into(),
            ));
        }
        if self.default_lock_timeout_secs == 0 {
            return Err(StoreError::Validation(
                "default_lock_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            change_retention_days: default_change_retention_days(),
            default_lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

fn default_change_retention_days() -> u32 {
    30
}

fn default_lock_timeout_secs() -> u32 {
    3600
}

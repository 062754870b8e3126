// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::types::{ETag, Href, SyncToken};

/// Kind of a recorded change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Resource was created.
    Create,
    /// Resource was updated.
    Update,
    /// Resource was deleted.
    Delete,
}

impl ChangeKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

impl FromStr for ChangeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ChangeKind::Create),
            "update" => Ok(ChangeKind::Update),
            "delete" => Ok(ChangeKind::Delete),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable change-log entry.
///
/// Rows are append-only and totally ordered by creation within a collection.
/// Each row is stamped with the sync token assigned by the mutation that
/// produced it, so a token always resolves to a position in the log.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SyncChange {
    /// Owning collection.
    pub collection_id: String,

    /// Changed object; `None` for collection-level events. Retained for
    /// deletes even though the object row is gone.
    pub object_id: Option<String>,

    /// What happened.
    pub kind: ChangeKind,

    /// The sync token assigned by this mutation.
    pub sync_token: SyncToken,

    /// Resource path of the changed resource.
    pub href: Href,

    /// `ETag` at the time of the change, when the change targeted an object.
    pub etag: Option<ETag>,

    /// When the change was recorded.
    pub created_at: DateTime<Utc>,
}

/// Result of a changes-since query.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChangeSet {
    /// Changes recorded strictly after the supplied token, in creation order.
    pub changes: Vec<SyncChange>,

    /// The collection's current token; hand this back on the next poll.
    pub new_token: SyncToken,
}

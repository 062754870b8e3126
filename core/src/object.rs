// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};

use crate::types::{ComponentKind, ETag, ObjectStatus};

/// One calendar entry inside a collection.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CalendarObject {
    /// Opaque identifier assigned by the store.
    pub id: String,

    /// Owning collection.
    pub collection_id: String,

    /// Client-assigned stable identity, unique within the collection.
    pub uid: String,

    /// Version tag; regenerated on every write.
    pub etag: ETag,

    /// Raw iCalendar payload, stored verbatim.
    pub data: String,

    /// Component kind of the stored entry.
    pub kind: ComponentKind,

    /// Denormalized `SUMMARY` for listings.
    pub summary: Option<String>,

    /// Denormalized `DESCRIPTION`.
    pub description: Option<String>,

    /// Denormalized start time used by the time-window index.
    pub start: Option<DateTime<Utc>>,

    /// Denormalized end time.
    pub end: Option<DateTime<Utc>>,

    /// Monotonically non-decreasing revision counter.
    pub sequence: i64,

    /// Status, if the document carries one.
    pub status: Option<ObjectStatus>,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Half-open time window `[start, end)`.
///
/// An object overlaps the window when `object.start < window.end` and
/// `object.end > window.start`; objects without both times never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,

    /// Exclusive upper bound.
    pub end: DateTime<Utc>,
}

/// Filter for listing objects in a collection.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ObjectFilter {
    /// Restrict to one component kind.
    #[serde(default)]
    pub kind: Option<ComponentKind>,

    /// Restrict to objects overlapping a time window.
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

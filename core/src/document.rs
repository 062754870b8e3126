// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing of client-supplied iCalendar documents.
//!
//! Only the fields the store indexes are extracted; the raw document is kept
//! verbatim as the object payload. Recurrence rules are stored opaquely and
//! never expanded here.

use chrono::{DateTime, Utc};
use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::StoreError;
use crate::types::{ComponentKind, ObjectStatus};

/// A validated calendar document, normalized for indexing.
#[derive(Debug, Clone)]
pub struct ObjectDocument {
    /// Client-assigned stable identity, unique within a collection.
    pub uid: String,

    /// Kind of the first recognized component.
    pub kind: ComponentKind,

    /// `SUMMARY`, if present.
    pub summary: Option<String>,

    /// `DESCRIPTION`, if present.
    pub description: Option<String>,

    /// Denormalized start time for the time-window index.
    pub start: Option<DateTime<Utc>>,

    /// Denormalized end time (`DTEND`, or `DUE` for todos).
    pub end: Option<DateTime<Utc>>,

    /// `SEQUENCE` revision counter; 0 when absent.
    pub sequence: i64,

    /// `STATUS`, if present and recognized.
    pub status: Option<ObjectStatus>,

    /// The raw document payload, stored verbatim.
    pub raw: String,
}

impl ObjectDocument {
    /// Parses a raw iCalendar document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the document cannot be parsed,
    /// contains no supported component, or its component carries no `UID`.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let unfolded = unfold(raw);
        let calendar = read_calendar(&unfolded)
            .map_err(|e| StoreError::Validation(format!("invalid icalendar document: {e}")))?;

        let component = calendar
            .components
            .iter()
            .find_map(|c| {
                c.name
                    .as_ref()
                    .parse::<ComponentKind>()
                    .ok()
                    .map(|kind| (kind, c))
            })
            .ok_or_else(|| {
                StoreError::Validation("document contains no supported component".into())
            })?;
        let (kind, component) = component;

        let uid = component
            .find_prop("UID")
            .map(|p| p.val.to_string())
            .filter(|uid| !uid.trim().is_empty())
            .ok_or_else(|| StoreError::Validation("document has no UID".into()))?;

        let summary = component.find_prop("SUMMARY").map(|p| p.val.to_string());
        let description = component.find_prop("DESCRIPTION").map(|p| p.val.to_string());

        let start = prop_datetime(component, "DTSTART");
        let end = match kind {
            ComponentKind::Todo => {
                prop_datetime(component, "DUE").or_else(|| prop_datetime(component, "DTEND"))
            }
            _ => prop_datetime(component, "DTEND"),
        };

        let sequence = match component.find_prop("SEQUENCE") {
            Some(p) => p.val.as_ref().parse::<i64>().map_err(|_| {
                StoreError::Validation(format!("invalid SEQUENCE value: {}", p.val))
            })?,
            None => 0,
        };
        if sequence < 0 {
            return Err(StoreError::Validation(format!(
                "SEQUENCE must not be negative, got {sequence}"
            )));
        }

        let status = component
            .find_prop("STATUS")
            .and_then(|p| p.val.as_ref().parse::<ObjectStatus>().ok());

        Ok(Self {
            uid,
            kind,
            summary,
            description,
            start,
            end,
            sequence,
            status,
            raw: raw.to_string(),
        })
    }
}

fn prop_datetime(component: &Component<'_>, name: &str) -> Option<DateTime<Utc>> {
    let prop = component.find_prop(name)?;
    let dpt = DatePerhapsTime::try_from(prop).ok()?;
    to_utc(dpt)
}

/// Collapses the iCalendar date forms to a UTC instant for indexing.
/// Floating and zoned times are indexed as-if UTC; the stored payload keeps
/// full fidelity.
fn to_utc(dpt: DatePerhapsTime) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(d.and_hms_opt(0, 0, 0)?.and_utc()),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Utc(dt) => Some(dt),
            CalendarDateTime::Floating(naive) => Some(naive.and_utc()),
            CalendarDateTime::WithTimezone { date_time, .. } => Some(date_time.and_utc()),
        },
    }
}

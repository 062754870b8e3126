// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for the store module.

use crate::collection::{Collection, CollectionDraft};
use crate::store::CalStore;
use crate::{StoreConfig, StoreError};

/// Creates an in-memory store with the default configuration, migrations
/// applied and ready for testing.
pub async fn setup_store() -> CalStore {
    CalStore::open(StoreConfig::default())
        .await
        .expect("Failed to create test store")
}

/// Creates a store plus one collection owned by `alice`.
pub async fn setup_store_with_collection() -> (CalStore, Collection) {
    let store = setup_store().await;
    let collection = store
        .create_collection("alice", CollectionDraft::new("Work"))
        .await
        .expect("Failed to create test collection");
    (store, collection)
}

/// A minimal VEVENT document with fixed times.
pub fn ics_event(uid: &str, summary: &str) -> String {
    ics_event_at(uid, summary, "20240601T100000Z", "20240601T110000Z")
}

/// A VEVENT document with explicit `DTSTART`/`DTEND` values.
pub fn ics_event_at(uid: &str, summary: &str, start: &str, end: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
         UID:{uid}\r\nSUMMARY:{summary}\r\nDTSTART:{start}\r\nDTEND:{end}\r\n\
         END:VEVENT\r\nEND:VCALENDAR\r\n"
    )
}

/// A VEVENT document carrying an explicit `SEQUENCE`.
pub fn ics_event_seq(uid: &str, summary: &str, sequence: i64) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
         UID:{uid}\r\nSUMMARY:{summary}\r\nDTSTART:20240601T100000Z\r\n\
         DTEND:20240601T110000Z\r\nSEQUENCE:{sequence}\r\n\
         END:VEVENT\r\nEND:VCALENDAR\r\n"
    )
}

/// A minimal VTODO document.
pub fn ics_todo(uid: &str, summary: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VTODO\r\n\
         UID:{uid}\r\nSUMMARY:{summary}\r\nDUE:20240610T120000Z\r\n\
         END:VTODO\r\nEND:VCALENDAR\r\n"
    )
}

/// A VEVENT with `STATUS:CANCELLED`.
pub fn ics_cancelled_event(uid: &str, summary: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n\
         UID:{uid}\r\nSUMMARY:{summary}\r\nDTSTART:20240601T100000Z\r\n\
         DTEND:20240601T110000Z\r\nSTATUS:CANCELLED\r\n\
         END:VEVENT\r\nEND:VCALENDAR\r\n"
    )
}

/// Asserts that a result failed with `Validation`.
pub fn assert_validation<T: std::fmt::Debug>(result: Result<T, StoreError>) {
    assert!(
        matches!(result, Err(StoreError::Validation(_))),
        "expected Validation error, got {result:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn setup_creates_a_usable_in_memory_store() {
        let (store, collection) = setup_store_with_collection().await;
        let fetched = store.get_collection(&collection.id, "alice").await.unwrap();
        assert_eq!(fetched.name, "Work");
    }

    #[test]
    fn event_fixture_parses() {
        let raw = ics_event("e1", "Standup");
        let doc = crate::document::ObjectDocument::parse(&raw).unwrap();
        assert_eq!(doc.uid, "e1");
        assert_eq!(doc.summary.as_deref(), Some("Standup"));
    }
}

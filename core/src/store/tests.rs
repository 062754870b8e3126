// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scenario tests for the store facade.
//!
//! These exercise the cross-cutting guarantees: mutation atomicity, `ETag`
//! optimistic concurrency, sync-token resolution, lock conflict rules, and
//! cascade cleanup on deletes.

use chrono::{TimeZone, Utc};

use super::CalStore;
use super::tests_utils::*;
use crate::change::ChangeKind;
use crate::collection::{CollectionDraft, CollectionPatch};
use crate::lock::{Depth, LockRequest, LockScope};
use crate::object::{ObjectFilter, TimeWindow};
use crate::store::changes::Changes;
use crate::store::objects::{ObjectRecord, Objects};
use crate::types::ComponentKind;
use crate::{StoreConfig, StoreError, ident};

// ----------------------------------------------------------------------
// Collections

#[tokio::test]
async fn create_collection_rejects_blank_and_oversized_names() {
    let store = setup_store().await;

    assert_validation(store.create_collection("alice", CollectionDraft::new("  ")).await);
    assert_validation(
        store
            .create_collection("alice", CollectionDraft::new("x".repeat(256)))
            .await,
    );
    assert_validation(store.create_collection("", CollectionDraft::new("Work")).await);
}

#[tokio::test]
async fn foreign_private_collections_are_reported_as_missing() {
    let (store, collection) = setup_store_with_collection().await;

    assert!(matches!(
        store.get_collection(&collection.id, "bob").await,
        Err(StoreError::NotFound(_))
    ));

    let mut draft = CollectionDraft::new("Holidays");
    draft.is_public = true;
    let public = store.create_collection("alice", draft).await.unwrap();
    let fetched = store.get_collection(&public.id, "bob").await.unwrap();
    assert_eq!(fetched.name, "Holidays");
}

#[tokio::test]
async fn only_the_owner_may_update_or_delete() {
    let (store, collection) = setup_store_with_collection().await;

    let patch = CollectionPatch {
        name: Some("Renamed".into()),
        ..CollectionPatch::default()
    };
    assert!(matches!(
        store.update_collection(&collection.id, "bob", patch).await,
        Err(StoreError::NotFound(_)) | Err(StoreError::Forbidden(_))
    ));
    assert!(matches!(
        store.delete_collection(&collection.id, "bob").await,
        Err(StoreError::NotFound(_)) | Err(StoreError::Forbidden(_))
    ));
}

#[tokio::test]
async fn metadata_updates_do_not_rotate_the_sync_token() {
    let (store, collection) = setup_store_with_collection().await;
    let before = store.current_token(&collection.id).await.unwrap();

    let patch = CollectionPatch {
        name: Some("Renamed".into()),
        description: Some(Some("notes".into())),
        ..CollectionPatch::default()
    };
    let updated = store
        .update_collection(&collection.id, "alice", patch)
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("notes"));
    assert_eq!(store.current_token(&collection.id).await.unwrap(), before);
}

#[tokio::test]
async fn patch_with_explicit_null_clears_a_field() {
    let store = setup_store().await;
    let mut draft = CollectionDraft::new("Work");
    draft.description = Some("old".into());
    let collection = store.create_collection("alice", draft).await.unwrap();

    let patch = CollectionPatch {
        description: Some(None),
        ..CollectionPatch::default()
    };
    let updated = store
        .update_collection(&collection.id, "alice", patch)
        .await
        .unwrap();
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn ensure_default_creates_once_and_then_reuses() {
    let store = setup_store().await;

    let first = store.ensure_default_collection("alice").await.unwrap();
    assert!(first.is_default);

    let second = store.ensure_default_collection("alice").await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(store.list_collections("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn the_default_collection_cannot_be_deleted() {
    let store = setup_store().await;
    let default = store.ensure_default_collection("alice").await.unwrap();

    assert!(matches!(
        store.delete_collection(&default.id, "alice").await,
        Err(StoreError::Conflict(_))
    ));
    assert!(store.get_collection(&default.id, "alice").await.is_ok());
}

#[tokio::test]
async fn set_default_moves_the_flag_atomically() {
    let store = setup_store().await;
    let old = store.ensure_default_collection("alice").await.unwrap();
    let new = store
        .create_collection("alice", CollectionDraft::new("Work"))
        .await
        .unwrap();

    store.set_default_collection(&new.id, "alice").await.unwrap();

    let collections = store.list_collections("alice").await.unwrap();
    let defaults: Vec<_> = collections.iter().filter(|c| c.is_default).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, new.id);
    assert_ne!(defaults[0].id, old.id);
}

#[tokio::test]
async fn deleting_a_collection_cascades_to_everything_under_it() {
    let (store, collection) = setup_store_with_collection().await;
    let object = store
        .create_object(&collection.id, &ics_event("e1", "Standup"))
        .await
        .unwrap();

    let object_href = ident::object_href("alice", &collection.id, &object.uid);
    store
        .set_property(&object_href, "urn:example:x", "note", Some("keep"))
        .await
        .unwrap();
    store
        .acquire_lock(&object_href, LockRequest::exclusive_write())
        .await
        .unwrap();

    store.delete_collection(&collection.id, "alice").await.unwrap();

    assert!(matches!(
        store.get_collection(&collection.id, "alice").await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.get_object(&collection.id, &object.id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.get_property(&object_href, "urn:example:x", "note").await,
        Err(StoreError::NotFound(_))
    ));
    // The lock went with the collection, so a new one is grantable.
    assert!(store.validate_lock(&object_href, None).await.unwrap());
}

// ----------------------------------------------------------------------
// Objects

#[tokio::test]
async fn create_assigns_etag_and_starts_at_revision_zero() {
    let (store, collection) = setup_store_with_collection().await;

    // A client-claimed SEQUENCE does not survive creation.
    let object = store
        .create_object(&collection.id, &ics_event_seq("e1", "Standup", 7))
        .await
        .unwrap();

    assert_eq!(object.uid, "e1");
    assert_eq!(object.sequence, 0);
    assert!(object.etag.as_str().starts_with('"'));
    assert_eq!(object.kind, ComponentKind::Event);
}

#[tokio::test]
async fn duplicate_uid_is_rejected_without_side_effects() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(&collection.id, &ics_event("e1", "First"))
        .await
        .unwrap();
    let token = store.current_token(&collection.id).await.unwrap();

    let result = store
        .create_object(&collection.id, &ics_event("e1", "Second"))
        .await;

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    let objects = store
        .list_objects(&collection.id, &ObjectFilter::default())
        .await
        .unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].summary.as_deref(), Some("First"));
    assert_eq!(store.current_token(&collection.id).await.unwrap(), token);
}

#[tokio::test]
async fn a_unique_constraint_hit_surfaces_as_conflict() {
    let (store, collection) = setup_store_with_collection().await;
    let object = store
        .create_object(&collection.id, &ics_event("e1", "First"))
        .await
        .unwrap();

    // A writer on another connection can pass the uid existence check and
    // still land on the UNIQUE (collection_id, uid) constraint. Drive the
    // insert directly to take that path deterministically.
    let duplicate = ObjectRecord {
        id: "other-id".into(),
        collection_id: collection.id.clone(),
        uid: object.uid.clone(),
        etag: "\"other\"".into(),
        data: ics_event("e1", "Second"),
        kind: "VEVENT".into(),
        summary: Some("Second".into()),
        description: None,
        dtstart: None,
        dtend: None,
        sequence: 0,
        status: None,
        created_at: "2024-06-01T10:00:00Z".into(),
        updated_at: "2024-06-01T10:00:00Z".into(),
    };
    let err = Objects::insert(&store.pool, &duplicate)
        .await
        .map_err(StoreError::from)
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn every_successful_write_issues_a_fresh_etag() {
    let (store, collection) = setup_store_with_collection().await;
    let v1 = store
        .create_object(&collection.id, &ics_event("e1", "v1"))
        .await
        .unwrap();
    let v2 = store
        .update_object(&collection.id, &v1.id, &ics_event("e1", "v2"), None)
        .await
        .unwrap();
    let v3 = store
        .update_object(&collection.id, &v1.id, &ics_event("e1", "v3"), None)
        .await
        .unwrap();

    assert_ne!(v1.etag, v2.etag);
    assert_ne!(v2.etag, v3.etag);
    assert_ne!(v1.etag, v3.etag);
}

#[tokio::test]
async fn stale_etag_fails_the_update_and_leaves_the_object_untouched() {
    let (store, collection) = setup_store_with_collection().await;
    let v1 = store
        .create_object(&collection.id, &ics_event("e1", "v1"))
        .await
        .unwrap();
    let v2 = store
        .update_object(&collection.id, &v1.id, &ics_event("e1", "v2"), Some(&v1.etag))
        .await
        .unwrap();

    let result = store
        .update_object(&collection.id, &v1.id, &ics_event("e1", "v3"), Some(&v1.etag))
        .await;
    assert!(matches!(result, Err(StoreError::PreconditionFailed { .. })));

    let current = store.get_object(&collection.id, &v1.id).await.unwrap();
    assert_eq!(current.etag, v2.etag);
    assert_eq!(current.summary.as_deref(), Some("v2"));
}

#[tokio::test]
async fn stale_etag_also_protects_deletes() {
    let (store, collection) = setup_store_with_collection().await;
    let v1 = store
        .create_object(&collection.id, &ics_event("e1", "v1"))
        .await
        .unwrap();
    store
        .update_object(&collection.id, &v1.id, &ics_event("e1", "v2"), None)
        .await
        .unwrap();

    let result = store.delete_object(&collection.id, &v1.id, Some(&v1.etag)).await;
    assert!(matches!(result, Err(StoreError::PreconditionFailed { .. })));
    assert!(store.get_object(&collection.id, &v1.id).await.is_ok());
}

#[tokio::test]
async fn update_rejects_uid_changes_and_sequence_regressions() {
    let (store, collection) = setup_store_with_collection().await;
    let object = store
        .create_object(&collection.id, &ics_event("e1", "v1"))
        .await
        .unwrap();

    assert_validation(
        store
            .update_object(&collection.id, &object.id, &ics_event("other-uid", "v2"), None)
            .await,
    );

    let advanced = store
        .update_object(&collection.id, &object.id, &ics_event_seq("e1", "v2", 3), None)
        .await
        .unwrap();
    assert_eq!(advanced.sequence, 3);

    assert_validation(
        store
            .update_object(&collection.id, &object.id, &ics_event_seq("e1", "v3", 1), None)
            .await,
    );
}

#[tokio::test]
async fn listing_filters_by_kind_and_orders_by_start() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(
            &collection.id,
            &ics_event_at("late", "Late", "20240601T150000Z", "20240601T160000Z"),
        )
        .await
        .unwrap();
    store
        .create_object(
            &collection.id,
            &ics_event_at("early", "Early", "20240601T080000Z", "20240601T090000Z"),
        )
        .await
        .unwrap();
    store
        .create_object(&collection.id, &ics_todo("t1", "Ship it"))
        .await
        .unwrap();

    let all = store
        .list_objects(&collection.id, &ObjectFilter::default())
        .await
        .unwrap();
    let uids: Vec<_> = all.iter().map(|o| o.uid.as_str()).collect();
    assert_eq!(uids, ["early", "late", "t1"]);

    let filter = ObjectFilter {
        kind: Some(ComponentKind::Todo),
        window: None,
    };
    let todos = store.list_objects(&collection.id, &filter).await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].uid, "t1");
}

#[tokio::test]
async fn time_window_overlap_is_half_open() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(
            &collection.id,
            &ics_event_at("before", "Before", "20240601T090000Z", "20240601T100000Z"),
        )
        .await
        .unwrap();
    store
        .create_object(
            &collection.id,
            &ics_event_at("inside", "Inside", "20240601T100000Z", "20240601T110000Z"),
        )
        .await
        .unwrap();

    let filter = ObjectFilter {
        kind: None,
        window: Some(TimeWindow {
            start: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }),
    };
    let hits = store.list_objects(&collection.id, &filter).await.unwrap();

    // "before" ends exactly at the window start and must not match.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].uid, "inside");
}

// ----------------------------------------------------------------------
// Sync

#[tokio::test]
async fn a_mutation_and_its_change_record_commit_together() {
    let (store, collection) = setup_store_with_collection().await;
    let before = store.current_token(&collection.id).await.unwrap();

    store
        .create_object(&collection.id, &ics_event("e1", "Standup"))
        .await
        .unwrap();

    let after = store.current_token(&collection.id).await.unwrap();
    assert_ne!(before, after);

    let set = store.changes_since(&collection.id, &before).await.unwrap();
    assert_eq!(set.changes.len(), 1);
    assert_eq!(set.changes[0].kind, ChangeKind::Create);
    // The change row is stamped with the token it produced.
    assert_eq!(set.changes[0].sync_token, after);
    assert_eq!(set.new_token, after);
}

#[tokio::test]
async fn changes_since_walks_the_full_create_update_delete_history() {
    let (store, collection) = setup_store_with_collection().await;
    let t0 = store.current_token(&collection.id).await.unwrap();

    let e1 = store
        .create_object(&collection.id, &ics_event("e1", "One"))
        .await
        .unwrap();
    let e2 = store
        .create_object(&collection.id, &ics_event("e2", "Two"))
        .await
        .unwrap();

    let s1 = store.changes_since(&collection.id, &t0).await.unwrap();
    assert_eq!(s1.changes.len(), 2);
    assert!(s1.changes.iter().all(|c| c.kind == ChangeKind::Create));
    let t1 = s1.new_token;

    store
        .update_object(&collection.id, &e1.id, &ics_event("e1", "One v2"), None)
        .await
        .unwrap();
    store
        .delete_object(&collection.id, &e2.id, None)
        .await
        .unwrap();

    let s2 = store.changes_since(&collection.id, &t1).await.unwrap();
    assert_eq!(s2.changes.len(), 2);
    assert_eq!(s2.changes[0].kind, ChangeKind::Update);
    assert_eq!(s2.changes[1].kind, ChangeKind::Delete);
    // Deletes keep the object identity and last etag for the client.
    assert_eq!(s2.changes[1].object_id.as_deref(), Some(e2.id.as_str()));
    assert!(s2.changes[1].etag.is_some());

    // From t0 the whole history replays, in order.
    let full = store.changes_since(&collection.id, &t0).await.unwrap();
    assert_eq!(full.changes.len(), 4);
    assert_eq!(full.new_token, s2.new_token);

    // The query is read-only; asking twice gives the same answer.
    let again = store.changes_since(&collection.id, &t0).await.unwrap();
    assert_eq!(again.changes.len(), 4);
}

#[tokio::test]
async fn polling_with_the_current_token_returns_no_changes() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(&collection.id, &ics_event("e1", "Standup"))
        .await
        .unwrap();

    let current = store.current_token(&collection.id).await.unwrap();
    let set = store.changes_since(&collection.id, &current).await.unwrap();
    assert!(set.changes.is_empty());
    assert_eq!(set.new_token, current);
}

#[tokio::test]
async fn unknown_tokens_force_a_full_resync() {
    let (store, collection) = setup_store_with_collection().await;

    let result = store
        .changes_since(&collection.id, &"never-issued".into())
        .await;
    assert!(matches!(result, Err(StoreError::TokenInvalidated)));
}

#[tokio::test]
async fn purged_tokens_force_a_full_resync() {
    let (store, collection) = setup_store_with_collection().await;
    let t0 = store.current_token(&collection.id).await.unwrap();
    store
        .create_object(&collection.id, &ics_event("e1", "One"))
        .await
        .unwrap();
    store
        .create_object(&collection.id, &ics_event("e2", "Two"))
        .await
        .unwrap();

    // Force the retention horizon past every row; only the newest row per
    // collection survives, keeping the current token resolvable.
    let purged = Changes::purge_older_than(&store.pool, "9999-01-01T00:00:00Z")
        .await
        .unwrap();
    assert!(purged >= 2);

    assert!(matches!(
        store.changes_since(&collection.id, &t0).await,
        Err(StoreError::TokenInvalidated)
    ));

    let current = store.current_token(&collection.id).await.unwrap();
    let set = store.changes_since(&collection.id, &current).await.unwrap();
    assert!(set.changes.is_empty());
}

#[tokio::test]
async fn purge_respects_the_configured_retention() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(&collection.id, &ics_event("e1", "One"))
        .await
        .unwrap();

    // Rows are far younger than the 30-day default, so nothing goes.
    assert_eq!(store.purge_changes().await.unwrap(), 0);
    let t0 = store.current_token(&collection.id).await.unwrap();
    assert!(store.changes_since(&collection.id, &t0).await.is_ok());
}

// ----------------------------------------------------------------------
// Locks

#[tokio::test]
async fn exclusive_locks_do_not_stack() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");

    store
        .acquire_lock(&href, LockRequest::exclusive_write())
        .await
        .unwrap();

    assert!(matches!(
        store.acquire_lock(&href, LockRequest::exclusive_write()).await,
        Err(StoreError::Locked(_))
    ));
}

#[tokio::test]
async fn racing_exclusive_acquisitions_grant_exactly_one_lock() {
    // On disk the pool runs several connections, so the two requests
    // genuinely interleave instead of serializing on one handle.
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        db_path: Some(dir.path().join("kalends.db")),
        ..StoreConfig::default()
    };
    let store = CalStore::open(config).await.unwrap();
    let collection = store
        .create_collection("alice", CollectionDraft::new("Work"))
        .await
        .unwrap();
    let href = ident::object_href("alice", &collection.id, "e1");

    let (a, b) = tokio::join!(
        store.acquire_lock(&href, LockRequest::exclusive_write()),
        store.acquire_lock(&href, LockRequest::exclusive_write()),
    );

    let granted = [&a, &b].into_iter().filter(|r| r.is_ok()).count();
    assert_eq!(granted, 1, "a: {a:?}, b: {b:?}");
    for result in [a, b] {
        if let Err(e) = result {
            // The loser either saw the winner's row or lost the write race
            // inside its transaction; the latter is retryable contention.
            assert!(
                matches!(e, StoreError::Locked(_) | StoreError::Timeout),
                "got {e:?}"
            );
        }
    }
}

#[tokio::test]
async fn shared_locks_coexist_until_an_exclusive_arrives() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");
    let shared = LockRequest {
        scope: LockScope::Shared,
        ..LockRequest::exclusive_write()
    };

    store.acquire_lock(&href, shared.clone()).await.unwrap();
    store.acquire_lock(&href, shared).await.unwrap();

    assert!(matches!(
        store.acquire_lock(&href, LockRequest::exclusive_write()).await,
        Err(StoreError::Locked(_))
    ));
}

#[tokio::test]
async fn an_infinite_depth_lock_guards_the_whole_subtree() {
    let (store, collection) = setup_store_with_collection().await;
    let root = ident::collection_href("alice", &collection.id);
    let leaf = ident::object_href("alice", &collection.id, "e1");

    let mut request = LockRequest::exclusive_write();
    request.depth = Depth::Infinity;
    let lock = store.acquire_lock(&root, request).await.unwrap();

    assert!(matches!(
        store.acquire_lock(&leaf, LockRequest::exclusive_write()).await,
        Err(StoreError::Locked(_))
    ));
    assert!(!store.validate_lock(&leaf, None).await.unwrap());
    assert!(store.validate_lock(&leaf, Some(&lock.token)).await.unwrap());
}

#[tokio::test]
async fn validate_passes_on_unlocked_paths_and_checks_tokens_on_locked_ones() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");

    assert!(store.validate_lock(&href, None).await.unwrap());

    let lock = store
        .acquire_lock(&href, LockRequest::exclusive_write())
        .await
        .unwrap();
    assert!(!store.validate_lock(&href, None).await.unwrap());
    assert!(!store.validate_lock(&href, Some("urn:uuid:wrong")).await.unwrap());
    assert!(store.validate_lock(&href, Some(&lock.token)).await.unwrap());

    store.release_lock(&lock.token).await.unwrap();
    assert!(store.validate_lock(&href, None).await.unwrap());
}

#[tokio::test]
async fn release_is_idempotent() {
    let store = setup_store().await;
    store.release_lock("urn:uuid:never-granted").await.unwrap();
}

#[tokio::test]
async fn expired_locks_stop_blocking_even_before_the_sweep() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");

    let mut request = LockRequest::exclusive_write();
    request.timeout_secs = Some(1);
    let lock = store.acquire_lock(&href, request).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    assert!(store.validate_lock(&href, None).await.unwrap());
    assert!(matches!(
        store.refresh_lock(&lock.token).await,
        Err(StoreError::NotFound(_))
    ));
    store
        .acquire_lock(&href, LockRequest::exclusive_write())
        .await
        .unwrap();

    assert_eq!(store.sweep_expired_locks().await.unwrap(), 1);
}

#[tokio::test]
async fn refresh_extends_the_expiry() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");

    let lock = store
        .acquire_lock(&href, LockRequest::exclusive_write())
        .await
        .unwrap();
    let refreshed = store.refresh_lock(&lock.token).await.unwrap();

    assert!(refreshed.expires_at >= lock.expires_at);
    assert_eq!(refreshed.token, lock.token);

    assert!(matches!(
        store.refresh_lock("urn:uuid:never-granted").await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn zero_timeout_requests_are_rejected() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::object_href("alice", &collection.id, "e1");

    let mut request = LockRequest::exclusive_write();
    request.timeout_secs = Some(0);
    assert_validation(store.acquire_lock(&href, request).await);
}

// ----------------------------------------------------------------------
// Properties

#[tokio::test]
async fn properties_set_get_overwrite_and_remove() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::collection_href("alice", &collection.id);

    assert!(matches!(
        store.get_property(&href, "DAV:", "displayname").await,
        Err(StoreError::NotFound(_))
    ));

    store
        .set_property(&href, "DAV:", "displayname", Some("Work"))
        .await
        .unwrap();
    assert_eq!(
        store.get_property(&href, "DAV:", "displayname").await.unwrap(),
        Some("Work".to_string())
    );

    store
        .set_property(&href, "DAV:", "displayname", Some("Play"))
        .await
        .unwrap();
    assert_eq!(
        store.get_property(&href, "DAV:", "displayname").await.unwrap(),
        Some("Play".to_string())
    );

    store.remove_property(&href, "DAV:", "displayname").await.unwrap();
    assert!(matches!(
        store.get_property(&href, "DAV:", "displayname").await,
        Err(StoreError::NotFound(_))
    ));
    // Removing again is a no-op.
    store.remove_property(&href, "DAV:", "displayname").await.unwrap();
}

#[tokio::test]
async fn properties_are_keyed_by_namespace() {
    let (store, collection) = setup_store_with_collection().await;
    let href = ident::collection_href("alice", &collection.id);

    store
        .set_property(&href, "DAV:", "color", Some("red"))
        .await
        .unwrap();
    store
        .set_property(&href, "urn:example:x", "color", Some("blue"))
        .await
        .unwrap();

    assert_eq!(
        store.get_property(&href, "DAV:", "color").await.unwrap(),
        Some("red".to_string())
    );
    assert_eq!(
        store.get_property(&href, "urn:example:x", "color").await.unwrap(),
        Some("blue".to_string())
    );
}

#[tokio::test]
async fn deleting_an_object_drops_its_properties() {
    let (store, collection) = setup_store_with_collection().await;
    let object = store
        .create_object(&collection.id, &ics_event("e1", "Standup"))
        .await
        .unwrap();
    let href = ident::object_href("alice", &collection.id, &object.uid);

    store
        .set_property(&href, "urn:example:x", "note", Some("keep"))
        .await
        .unwrap();
    store.delete_object(&collection.id, &object.id, None).await.unwrap();

    assert!(matches!(
        store.get_property(&href, "urn:example:x", "note").await,
        Err(StoreError::NotFound(_))
    ));
}

// ----------------------------------------------------------------------
// Feed

#[tokio::test]
async fn the_feed_reflects_live_objects_and_skips_cancelled_ones() {
    let (store, collection) = setup_store_with_collection().await;
    store
        .create_object(&collection.id, &ics_event("live", "Standup"))
        .await
        .unwrap();
    store
        .create_object(&collection.id, &ics_cancelled_event("gone", "Cancelled"))
        .await
        .unwrap();

    let feed = store.render_feed(&collection.id).await.unwrap();

    assert!(feed.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(feed.contains("X-WR-CALNAME:Work\r\n"));
    assert!(feed.contains("UID:live\r\n"));
    assert!(!feed.contains("UID:gone"));

    // Same state renders the same bytes.
    assert_eq!(feed, store.render_feed(&collection.id).await.unwrap());
}

// ----------------------------------------------------------------------
// Persistence

#[tokio::test]
async fn data_survives_a_reopen_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        db_path: Some(dir.path().join("kalends.db")),
        ..StoreConfig::default()
    };

    let store = CalStore::open(config.clone()).await.unwrap();
    let collection = store
        .create_collection("alice", CollectionDraft::new("Work"))
        .await
        .unwrap();
    store
        .create_object(&collection.id, &ics_event("e1", "Standup"))
        .await
        .unwrap();
    store.close().await;

    let reopened = CalStore::open(config).await.unwrap();
    let fetched = reopened.get_collection(&collection.id, "alice").await.unwrap();
    assert_eq!(fetched.name, "Work");
    let objects = reopened
        .list_objects(&collection.id, &ObjectFilter::default())
        .await
        .unwrap();
    assert_eq!(objects.len(), 1);
}

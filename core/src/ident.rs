// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Identifier and version-tag generation.
//!
//! Everything issued here is opaque to clients: identifiers, `ETag`s, sync
//! tokens and lock tokens carry no structure a client may depend on.

use uuid::Uuid;

use crate::types::{ETag, Href, SyncToken};

/// Generates a collection identifier.
#[must_use]
pub fn new_collection_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates an object identifier.
#[must_use]
pub fn new_object_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a fresh entity tag. Tags are never reused, even across updates
/// of the same object.
#[must_use]
pub fn new_etag() -> ETag {
    ETag::new(format!("\"{}\"", Uuid::new_v4().simple()))
}

/// Generates a fresh sync token.
#[must_use]
pub fn new_sync_token() -> SyncToken {
    SyncToken::new(Uuid::new_v4().simple().to_string())
}

/// Generates a lock token in the `urn:uuid:` form WebDAV clients expect.
#[must_use]
pub fn new_lock_token() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// The href of a collection: `/calendars/{owner}/{collection_id}/`.
#[must_use]
pub fn collection_href(owner: &str, collection_id: &str) -> Href {
    Href::new(format!("/calendars/{owner}/{collection_id}/"))
}

/// The href of an object inside a collection:
/// `/calendars/{owner}/{collection_id}/{uid}.ics`.
#[must_use]
pub fn object_href(owner: &str, collection_id: &str, uid: &str) -> Href {
    Href::new(format!("/calendars/{owner}/{collection_id}/{uid}.ics"))
}

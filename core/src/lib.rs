// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar synchronization core.
//!
//! A storage engine for CalDAV-style calendar servers: collections of
//! iCalendar objects with `ETag` versioning, a per-collection change log
//! driving incremental sync, WebDAV-style write locks and dead properties,
//! and a deterministic webcal feed projection. Protocol surfaces (HTTP,
//! XML) live in adapter crates; this crate owns the semantics.

mod change;
mod collection;
mod config;
mod datetime;
mod document;
mod error;
mod feed;
mod ident;
mod lock;
mod object;
mod store;
mod types;

pub use crate::change::{ChangeKind, ChangeSet, SyncChange};
pub use crate::collection::{Collection, CollectionDraft, CollectionPatch, MAX_NAME_LEN};
pub use crate::config::StoreConfig;
pub use crate::document::ObjectDocument;
pub use crate::error::StoreError;
pub use crate::ident::{collection_href, object_href};
pub use crate::lock::{Depth, Lock, LockRequest, LockScope, LockType};
pub use crate::object::{CalendarObject, ObjectFilter, TimeWindow};
pub use crate::store::CalStore;
pub use crate::types::{ComponentKind, ETag, Href, ObjectStatus, SyncToken};

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod changes;
mod collections;
mod locks;
mod objects;
mod properties;

#[cfg(test)]
pub(crate) mod tests_utils;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::change::{ChangeKind, ChangeSet};
use crate::collection::{Collection, CollectionDraft, CollectionPatch, MAX_NAME_LEN};
use crate::datetime::format_utc;
use crate::document::ObjectDocument;
use crate::lock::{Lock, LockRequest};
use crate::object::{CalendarObject, ObjectFilter};
use crate::store::changes::{ChangeRecord, Changes};
use crate::store::collections::{CollectionRecord, Collections};
use crate::store::locks::{LockRecord, Locks};
use crate::store::objects::{ObjectRecord, Objects};
use crate::store::properties::Properties;
use crate::types::{ETag, Href, ObjectStatus, SyncToken};
use crate::{StoreConfig, StoreError, feed, ident};

/// The calendar synchronization core.
///
/// `CalStore` owns the durable state: collections, calendar objects, the
/// per-collection change log, write locks, and dead properties. Every
/// mutating operation on objects runs the row change, the change-log append
/// and the sync-token rotation in one transaction; a reader can never
/// observe a token without its change row.
#[derive(Debug, Clone)]
pub struct CalStore {
    pool: SqlitePool,
    config: StoreConfig,

    collections: Collections,
    objects: Objects,
    changes: Changes,
    locks: Locks,
    properties: Properties,
}

impl CalStore {
    /// Opens the store, creating the schema if needed.
    ///
    /// If `config.db_path` is `None`, an in-memory database is opened.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        config.normalize()?;

        let options = if let Some(path) = &config.db_path {
            tracing::info!(path = %path.display(), "connecting to SQLite database");
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // An anonymous in-memory database exists per connection, so the
        // pool must not open a second one.
        let pool_options = if config.db_path.is_some() {
            SqlitePoolOptions::new()
        } else {
            SqlitePoolOptions::new().max_connections(1)
        };

        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("src/store/migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;

        Ok(Self {
            collections: Collections::new(pool.clone()),
            objects: Objects::new(pool.clone()),
            changes: Changes::new(pool.clone()),
            locks: Locks::new(pool.clone()),
            properties: Properties::new(pool.clone()),
            pool,
            config,
        })
    }

    /// Closes the store.
    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }

    // ------------------------------------------------------------------
    // Collections

    /// Creates a collection with a fresh identifier and initial sync token.
    ///
    /// The initial token is recorded as a collection-level change so every
    /// token ever handed out stays resolvable against the log.
    pub async fn create_collection(
        &self,
        owner: &str,
        draft: CollectionDraft,
    ) -> Result<Collection, StoreError> {
        if owner.trim().is_empty() {
            return Err(StoreError::Validation("owner must not be empty".into()));
        }
        validate_name(&draft.name)?;

        let now = Utc::now();
        let collection = Collection {
            id: ident::new_collection_id(),
            owner: owner.to_string(),
            name: draft.name,
            description: draft.description,
            color: draft.color,
            timezone: draft.timezone,
            sync_token: ident::new_sync_token(),
            is_default: draft.is_default,
            is_public: draft.is_public,
            webdav_enabled: draft.webdav_enabled,
            webcal_enabled: draft.webcal_enabled,
            created_at: now,
            updated_at: now,
        };
        let href = ident::collection_href(owner, &collection.id);

        let mut tx = self.pool.begin().await?;
        if collection.is_default {
            Collections::clear_default(&mut *tx, owner).await?;
        }
        Collections::insert(&mut *tx, &collections::record_from_parts(&collection)).await?;
        Changes::append(
            &mut *tx,
            &change_record(
                &collection.id,
                None,
                ChangeKind::Create,
                &collection.sync_token,
                &href,
                None,
                &now,
            ),
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(collection_id = %collection.id, owner, "created collection");
        Ok(collection)
    }

    /// Returns the owner's default collection, creating it on first use.
    pub async fn ensure_default_collection(&self, owner: &str) -> Result<Collection, StoreError> {
        if let Some(record) = self.collections.find_default(owner).await? {
            return Ok(record.into_collection());
        }

        let mut draft = CollectionDraft::new("Calendar");
        draft.is_default = true;
        self.create_collection(owner, draft).await
    }

    /// Fetches a collection. Access is scoped to the owner unless the
    /// collection is public; a foreign private collection is reported as
    /// missing rather than forbidden, so its existence is not leaked.
    pub async fn get_collection(&self, id: &str, owner: &str) -> Result<Collection, StoreError> {
        let collection = self.fetch_collection(id).await?;
        if collection.owner != owner && !collection.is_public {
            return Err(StoreError::NotFound(format!("collection {id}")));
        }
        Ok(collection)
    }

    /// Lists all collections of an owner, oldest first.
    pub async fn list_collections(&self, owner: &str) -> Result<Vec<Collection>, StoreError> {
        let records = self.collections.list_by_owner(owner).await?;
        Ok(records
            .into_iter()
            .map(CollectionRecord::into_collection)
            .collect())
    }

    /// Updates display attributes (name, description, color, timezone).
    ///
    /// Metadata changes are not synchronized content changes: the sync
    /// token is left untouched.
    pub async fn update_collection(
        &self,
        id: &str,
        owner: &str,
        patch: CollectionPatch,
    ) -> Result<Collection, StoreError> {
        let mut collection = self.fetch_collection(id).await?;
        if collection.owner != owner {
            return Err(StoreError::Forbidden(format!("collection {id}")));
        }

        if let Some(name) = patch.name {
            validate_name(&name)?;
            collection.name = name;
        }
        if let Some(description) = patch.description {
            collection.description = description;
        }
        if let Some(color) = patch.color {
            collection.color = color;
        }
        if let Some(timezone) = patch.timezone {
            collection.timezone = timezone;
        }
        collection.updated_at = Utc::now();

        Collections::update_display(
            &self.pool,
            &collection.id,
            &collection.name,
            collection.description.as_deref(),
            collection.color.as_deref(),
            collection.timezone.as_deref(),
            &format_utc(&collection.updated_at),
        )
        .await?;

        tracing::debug!(collection_id = %collection.id, "updated collection metadata");
        Ok(collection)
    }

    /// Marks a collection as its owner's default, clearing the previous one.
    pub async fn set_default_collection(
        &self,
        id: &str,
        owner: &str,
    ) -> Result<Collection, StoreError> {
        let mut collection = self.fetch_collection(id).await?;
        if collection.owner != owner {
            return Err(StoreError::Forbidden(format!("collection {id}")));
        }

        let mut tx = self.pool.begin().await?;
        Collections::clear_default(&mut *tx, owner).await?;
        Collections::set_default(&mut *tx, id).await?;
        tx.commit().await?;

        collection.is_default = true;
        Ok(collection)
    }

    /// Deletes a collection, cascading to its objects, their change
    /// records, and any locks and properties under the collection's path.
    ///
    /// The default collection is never deletable.
    pub async fn delete_collection(&self, id: &str, owner: &str) -> Result<(), StoreError> {
        let collection = self.fetch_collection(id).await?;
        if collection.owner != owner {
            return Err(StoreError::Forbidden(format!("collection {id}")));
        }
        if collection.is_default {
            return Err(StoreError::Conflict(
                "the default collection cannot be deleted".into(),
            ));
        }

        let href = ident::collection_href(&collection.owner, &collection.id);
        let mut tx = self.pool.begin().await?;
        Objects::delete_for_collection(&mut *tx, id).await?;
        Changes::delete_for_collection(&mut *tx, id).await?;
        Locks::delete_prefix(&mut *tx, &href).await?;
        Properties::remove_prefix(&mut *tx, &href).await?;
        Collections::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(collection_id = %id, owner, "deleted collection");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Objects

    /// Lists objects ordered by start time ascending (objects without a
    /// start time last), optionally filtered by kind and time window.
    pub async fn list_objects(
        &self,
        collection_id: &str,
        filter: &ObjectFilter,
    ) -> Result<Vec<CalendarObject>, StoreError> {
        self.fetch_collection(collection_id).await?;
        let records = self.objects.list(collection_id, filter).await?;
        Ok(records.into_iter().map(ObjectRecord::into_object).collect())
    }

    /// Fetches one object.
    pub async fn get_object(
        &self,
        collection_id: &str,
        object_id: &str,
    ) -> Result<CalendarObject, StoreError> {
        let record = self
            .objects
            .get(collection_id, object_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("object {object_id}")))?;
        Ok(record.into_object())
    }

    /// Creates an object from a raw iCalendar document.
    ///
    /// The document is validated before any state is touched. The row
    /// insert, the change-log append and the sync-token rotation commit as
    /// one unit.
    pub async fn create_object(
        &self,
        collection_id: &str,
        raw: &str,
    ) -> Result<CalendarObject, StoreError> {
        let doc = ObjectDocument::parse(raw)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let collection = Collections::fetch(&mut *tx, collection_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("collection {collection_id}")))?;
        if Objects::fetch_by_uid(&mut *tx, collection_id, &doc.uid)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict(format!(
                "uid {} already exists in collection {collection_id}",
                doc.uid
            )));
        }

        let etag = ident::new_etag();
        // A fresh object always starts at revision 0, whatever SEQUENCE the
        // document claims.
        let record = object_record(
            ident::new_object_id(),
            collection_id,
            &doc,
            &etag,
            0,
            &now,
            &now,
        );
        Objects::insert(&mut *tx, &record).await?;

        let token = ident::new_sync_token();
        let href = ident::object_href(&collection.owner, collection_id, &doc.uid);
        Changes::append(
            &mut *tx,
            &change_record(
                collection_id,
                Some(&record.id),
                ChangeKind::Create,
                &token,
                &href,
                Some(&etag),
                &now,
            ),
        )
        .await?;
        Collections::set_sync_token(&mut *tx, collection_id, &token, &format_utc(&now)).await?;
        tx.commit().await?;

        tracing::debug!(collection_id, object_id = %record.id, uid = %record.uid, "created object");
        Ok(record.into_object())
    }

    /// Replaces an object's document.
    ///
    /// When `expected_etag` is given and does not match the stored tag the
    /// update fails with [`StoreError::PreconditionFailed`] and leaves the
    /// object untouched. The document's `SEQUENCE` must not decrease.
    pub async fn update_object(
        &self,
        collection_id: &str,
        object_id: &str,
        raw: &str,
        expected_etag: Option<&ETag>,
    ) -> Result<CalendarObject, StoreError> {
        let doc = ObjectDocument::parse(raw)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let collection = Collections::fetch(&mut *tx, collection_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("collection {collection_id}")))?;
        let existing = Objects::fetch(&mut *tx, collection_id, object_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("object {object_id}")))?;

        check_precondition(expected_etag, &existing.etag)?;
        if doc.uid != existing.uid {
            return Err(StoreError::Validation(
                "the document UID must not change on update".into(),
            ));
        }
        if doc.sequence < existing.sequence {
            return Err(StoreError::Validation(format!(
                "SEQUENCE must not decrease: {} < {}",
                doc.sequence, existing.sequence
            )));
        }

        let etag = ident::new_etag();
        let mut record = object_record(
            existing.id,
            collection_id,
            &doc,
            &etag,
            doc.sequence,
            &now,
            &now,
        );
        record.created_at = existing.created_at;
        Objects::update(&mut *tx, &record).await?;

        let token = ident::new_sync_token();
        let href = ident::object_href(&collection.owner, collection_id, &record.uid);
        Changes::append(
            &mut *tx,
            &change_record(
                collection_id,
                Some(&record.id),
                ChangeKind::Update,
                &token,
                &href,
                Some(&etag),
                &now,
            ),
        )
        .await?;
        Collections::set_sync_token(&mut *tx, collection_id, &token, &format_utc(&now)).await?;
        tx.commit().await?;

        tracing::debug!(collection_id, object_id = %record.id, "updated object");
        Ok(record.into_object())
    }

    /// Deletes an object, with the same precondition semantics as update.
    ///
    /// The change record keeps the object's identifier and last `ETag` even
    /// though the row is gone, so sync clients can process the removal.
    pub async fn delete_object(
        &self,
        collection_id: &str,
        object_id: &str,
        expected_etag: Option<&ETag>,
    ) -> Result<(), StoreError> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let collection = Collections::fetch(&mut *tx, collection_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("collection {collection_id}")))?;
        let existing = Objects::fetch(&mut *tx, collection_id, object_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("object {object_id}")))?;
        check_precondition(expected_etag, &existing.etag)?;

        Objects::delete(&mut *tx, collection_id, object_id).await?;

        let href = ident::object_href(&collection.owner, collection_id, &existing.uid);
        Locks::delete_prefix(&mut *tx, &href).await?;
        Properties::remove_prefix(&mut *tx, &href).await?;

        let token = ident::new_sync_token();
        Changes::append(
            &mut *tx,
            &change_record(
                collection_id,
                Some(&existing.id),
                ChangeKind::Delete,
                &token,
                &href,
                Some(&ETag::new(existing.etag)),
                &now,
            ),
        )
        .await?;
        Collections::set_sync_token(&mut *tx, collection_id, &token, &format_utc(&now)).await?;
        tx.commit().await?;

        tracing::debug!(collection_id, object_id, "deleted object");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sync

    /// The collection's current sync token.
    pub async fn current_token(&self, collection_id: &str) -> Result<SyncToken, StoreError> {
        let collection = self.fetch_collection(collection_id).await?;
        Ok(collection.sync_token)
    }

    /// Every change recorded strictly after `token` was current, in
    /// creation order, together with the token to use for the next poll.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TokenInvalidated`] when the token cannot be
    /// resolved against the log anymore (older than the retention horizon,
    /// or never issued); the client must fall back to a full resync via
    /// [`CalStore::list_objects`].
    pub async fn changes_since(
        &self,
        collection_id: &str,
        token: &SyncToken,
    ) -> Result<ChangeSet, StoreError> {
        let collection = self.fetch_collection(collection_id).await?;
        if *token == collection.sync_token {
            return Ok(ChangeSet {
                changes: Vec::new(),
                new_token: collection.sync_token,
            });
        }

        let seq = self
            .changes
            .seq_of_token(collection_id, token)
            .await?
            .ok_or(StoreError::TokenInvalidated)?;
        let records = self.changes.list_after(collection_id, seq).await?;

        Ok(ChangeSet {
            changes: records
                .into_iter()
                .map(ChangeRecord::into_change)
                .collect(),
            new_token: collection.sync_token,
        })
    }

    /// Deletes change-log rows older than the configured retention window.
    /// Clients holding tokens from before the horizon get
    /// [`StoreError::TokenInvalidated`] on their next poll.
    pub async fn purge_changes(&self) -> Result<u64, StoreError> {
        let cutoff = Utc::now() - Duration::days(i64::from(self.config.change_retention_days));
        let purged = Changes::purge_older_than(&self.pool, &format_utc(&cutoff)).await?;
        if purged > 0 {
            tracing::info!(purged, "purged change-log rows past retention");
        }
        Ok(purged)
    }

    // ------------------------------------------------------------------
    // Locks

    /// Grants a lock on `href`, failing fast with [`StoreError::Locked`]
    /// when an incompatible lock covers the path. Expired locks never
    /// block acquisition, whether or not a sweep has run.
    pub async fn acquire_lock(
        &self,
        href: &Href,
        request: LockRequest,
    ) -> Result<Lock, StoreError> {
        let now = Utc::now();
        let timeout_secs = request
            .timeout_secs
            .unwrap_or(self.config.default_lock_timeout_secs);
        if timeout_secs == 0 {
            return Err(StoreError::Validation(
                "lock timeout must be at least 1 second".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let related = Locks::list_active_related(&mut *tx, href, now.timestamp()).await?;
        let conflict = related
            .into_iter()
            .map(LockRecord::into_lock)
            .find(|l| l.blocks(&request, href));
        if let Some(holder) = conflict {
            tracing::debug!(%href, holder = %holder.token, "lock request denied");
            return Err(StoreError::Locked(href.clone()));
        }

        let lock = Lock {
            token: ident::new_lock_token(),
            href: href.clone(),
            lock_type: request.lock_type,
            scope: request.scope,
            depth: request.depth,
            owner_info: request.owner_info,
            timeout_secs,
            expires_at: now + Duration::seconds(i64::from(timeout_secs)),
            created_at: now,
        };
        Locks::insert(&mut *tx, &lock_record(&lock)).await?;
        tx.commit().await?;

        tracing::debug!(%href, token = %lock.token, "lock granted");
        Ok(lock)
    }

    /// Extends a lock's expiry by its own timeout.
    pub async fn refresh_lock(&self, token: &str) -> Result<Lock, StoreError> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let record = Locks::fetch_active(&mut *tx, token, now.timestamp())
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("lock {token}")))?;
        let mut lock = record.into_lock();

        lock.expires_at = now + Duration::seconds(i64::from(lock.timeout_secs));
        Locks::refresh(&mut *tx, token, lock.expires_at.timestamp(), now.timestamp()).await?;
        tx.commit().await?;

        tracing::debug!(token, "lock refreshed");
        Ok(lock)
    }

    /// True if no active lock covers `href`, or the presented token belongs
    /// to one that does.
    pub async fn validate_lock(
        &self,
        href: &Href,
        token: Option<&str>,
    ) -> Result<bool, StoreError> {
        let now = Utc::now().timestamp();
        let covering: Vec<Lock> = Locks::list_active_related(&self.pool, href, now)
            .await?
            .into_iter()
            .map(LockRecord::into_lock)
            .filter(|l| l.covers(href))
            .collect();

        if covering.is_empty() {
            return Ok(true);
        }
        Ok(token.is_some_and(|t| covering.iter().any(|l| l.token == t)))
    }

    /// Removes a lock. Releasing an unknown or already-expired token is not
    /// an error.
    pub async fn release_lock(&self, token: &str) -> Result<(), StoreError> {
        let removed = Locks::delete(&self.pool, token).await?;
        if removed > 0 {
            tracing::debug!(token, "lock released");
        }
        Ok(())
    }

    /// Deletes all locks whose expiry has passed.
    pub async fn sweep_expired_locks(&self) -> Result<u64, StoreError> {
        let swept = Locks::delete_expired(&self.pool, Utc::now().timestamp()).await?;
        if swept > 0 {
            tracing::debug!(swept, "swept expired locks");
        }
        Ok(swept)
    }

    // ------------------------------------------------------------------
    // Properties

    /// Fetches a dead property. The value itself may be null.
    pub async fn get_property(
        &self,
        href: &Href,
        namespace: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        let record = self
            .properties
            .get(href, namespace, name)
            .await?
            .ok_or_else(|| {
                StoreError::NotFound(format!("property {{{namespace}}}{name} on {href}"))
            })?;
        Ok(record.value)
    }

    /// Sets (or overwrites) a dead property.
    pub async fn set_property(
        &self,
        href: &Href,
        namespace: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), StoreError> {
        Properties::set(&self.pool, href, namespace, name, value).await?;
        Ok(())
    }

    /// Removes a dead property. Removing a missing property is not an error.
    pub async fn remove_property(
        &self,
        href: &Href,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        Properties::remove(&self.pool, href, namespace, name).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Feed

    /// Renders the collection's current non-cancelled objects as one
    /// iCalendar document. Deterministic for identical store state, so the
    /// serving layer may cache by content hash.
    pub async fn render_feed(&self, collection_id: &str) -> Result<String, StoreError> {
        let collection = self.fetch_collection(collection_id).await?;
        let objects: Vec<CalendarObject> = self
            .objects
            .list(collection_id, &ObjectFilter::default())
            .await?
            .into_iter()
            .map(ObjectRecord::into_object)
            .filter(|o| o.status != Some(ObjectStatus::Cancelled))
            .collect();

        Ok(feed::render(&collection, &objects))
    }

    // ------------------------------------------------------------------

    async fn fetch_collection(&self, id: &str) -> Result<Collection, StoreError> {
        let record = self
            .collections
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("collection {id}")))?;
        Ok(record.into_collection())
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(
            "collection name must not be empty".into(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::Validation(format!(
            "collection name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn check_precondition(expected: Option<&ETag>, current: &str) -> Result<(), StoreError> {
    match expected {
        Some(expected) if expected.as_str() != current => Err(StoreError::PreconditionFailed {
            expected: expected.clone(),
            current: ETag::new(current.to_string()),
        }),
        _ => Ok(()),
    }
}

fn object_record(
    id: String,
    collection_id: &str,
    doc: &ObjectDocument,
    etag: &ETag,
    sequence: i64,
    created_at: &DateTime<Utc>,
    updated_at: &DateTime<Utc>,
) -> ObjectRecord {
    ObjectRecord {
        id,
        collection_id: collection_id.to_string(),
        uid: doc.uid.clone(),
        etag: etag.as_str().to_string(),
        data: doc.raw.clone(),
        kind: doc.kind.as_str().to_string(),
        summary: doc.summary.clone(),
        description: doc.description.clone(),
        dtstart: doc.start.as_ref().map(format_utc),
        dtend: doc.end.as_ref().map(format_utc),
        sequence,
        status: doc.status.map(|s| s.as_str().to_string()),
        created_at: format_utc(created_at),
        updated_at: format_utc(updated_at),
    }
}

fn change_record(
    collection_id: &str,
    object_id: Option<&str>,
    kind: ChangeKind,
    token: &SyncToken,
    href: &Href,
    etag: Option<&ETag>,
    at: &DateTime<Utc>,
) -> ChangeRecord {
    ChangeRecord {
        id: 0,
        collection_id: collection_id.to_string(),
        object_id: object_id.map(str::to_string),
        kind: kind.as_str().to_string(),
        sync_token: token.as_str().to_string(),
        href: href.to_string(),
        etag: etag.map(|e| e.as_str().to_string()),
        created_at: format_utc(at),
    }
}

fn lock_record(lock: &Lock) -> LockRecord {
    LockRecord {
        token: lock.token.clone(),
        href: lock.href.to_string(),
        lock_type: lock.lock_type.as_str().to_string(),
        scope: lock.scope.as_str().to_string(),
        depth: lock.depth.as_str().to_string(),
        owner_info: lock.owner_info.clone(),
        timeout_secs: i64::from(lock.timeout_secs),
        expires_at: lock.expires_at.timestamp(),
        created_at: format_utc(&lock.created_at),
    }
}

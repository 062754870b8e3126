// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{SqliteExecutor, SqlitePool};

use crate::change::{ChangeKind, SyncChange};
use crate::datetime::parse_utc;
use crate::types::{ETag, Href, SyncToken};

/// Data access for the append-only `changes` table.
///
/// Rows are only ever inserted by mutations (inside the mutation's
/// transaction), deleted when their collection is deleted, or purged by the
/// retention cleanup.
#[derive(Debug, Clone)]
pub struct Changes {
    pool: SqlitePool,
}

const COLUMNS: &str = "\
id, collection_id, object_id, kind, sync_token, href, etag, created_at";

impl Changes {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn append(
        db: impl SqliteExecutor<'_>,
        record: &ChangeRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO changes (collection_id, object_id, kind, sync_token, href, etag, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.collection_id)
            .bind(&record.object_id)
            .bind(&record.kind)
            .bind(&record.sync_token)
            .bind(&record.href)
            .bind(&record.etag)
            .bind(&record.created_at)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Resolves a sync token to its position in a collection's log.
    pub async fn seq_of_token(
        &self,
        collection_id: &str,
        token: &SyncToken,
    ) -> Result<Option<i64>, sqlx::Error> {
        const SQL: &str = "\
SELECT id FROM changes WHERE collection_id = ? AND sync_token = ?;
";

        let row: Option<(i64,)> = sqlx::query_as(SQL)
            .bind(collection_id)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    /// All changes recorded strictly after the given log position, in
    /// creation order.
    pub async fn list_after(
        &self,
        collection_id: &str,
        seq: i64,
    ) -> Result<Vec<ChangeRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM changes WHERE collection_id = ? AND id > ? ORDER BY id ASC;"
        );
        sqlx::query_as(&sql)
            .bind(collection_id)
            .bind(seq)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn delete_for_collection(
        db: impl SqliteExecutor<'_>,
        collection_id: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM changes WHERE collection_id = ?;";

        let result = sqlx::query(SQL).bind(collection_id).execute(db).await?;
        Ok(result.rows_affected())
    }

    /// Deletes change rows older than `cutoff`, always keeping each
    /// collection's newest row so the current token stays resolvable.
    pub async fn purge_older_than(
        db: impl SqliteExecutor<'_>,
        cutoff: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
DELETE FROM changes
WHERE created_at < ?
  AND id NOT IN (SELECT MAX(id) FROM changes GROUP BY collection_id);
";

        let result = sqlx::query(SQL).bind(cutoff).execute(db).await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ChangeRecord {
    #[sqlx(default)]
    pub id: i64,
    pub collection_id: String,
    pub object_id: Option<String>,
    pub kind: String,
    pub sync_token: String,
    pub href: String,
    pub etag: Option<String>,
    pub created_at: String,
}

impl ChangeRecord {
    pub fn into_change(self) -> SyncChange {
        SyncChange {
            collection_id: self.collection_id,
            object_id: self.object_id,
            kind: self.kind.parse().unwrap_or(ChangeKind::Update),
            sync_token: SyncToken::new(self.sync_token),
            href: Href::new(self.href),
            etag: self.etag.map(ETag::new),
            created_at: parse_utc(&self.created_at).unwrap_or(chrono::DateTime::UNIX_EPOCH),
        }
    }
}

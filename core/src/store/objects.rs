// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteExecutor, SqlitePool};

use crate::CalendarObject;
use crate::datetime::{format_utc, parse_utc};
use crate::object::ObjectFilter;
use crate::types::{ComponentKind, ETag};

/// Data access for the `objects` table.
#[derive(Debug, Clone)]
pub struct Objects {
    pool: SqlitePool,
}

const COLUMNS: &str = "\
id, collection_id, uid, etag, data, kind, summary, description,
dtstart, dtend, sequence, status, created_at, updated_at";

impl Objects {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(
        &self,
        collection_id: &str,
        object_id: &str,
    ) -> Result<Option<ObjectRecord>, sqlx::Error> {
        Self::fetch(&self.pool, collection_id, object_id).await
    }

    pub async fn fetch(
        db: impl SqliteExecutor<'_>,
        collection_id: &str,
        object_id: &str,
    ) -> Result<Option<ObjectRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM objects WHERE collection_id = ? AND id = ?;");
        sqlx::query_as(&sql)
            .bind(collection_id)
            .bind(object_id)
            .fetch_optional(db)
            .await
    }

    pub async fn fetch_by_uid(
        db: impl SqliteExecutor<'_>,
        collection_id: &str,
        uid: &str,
    ) -> Result<Option<ObjectRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM objects WHERE collection_id = ? AND uid = ?;");
        sqlx::query_as(&sql)
            .bind(collection_id)
            .bind(uid)
            .fetch_optional(db)
            .await
    }

    /// Lists objects ordered by start time ascending, objects without a
    /// start time last.
    pub async fn list(
        &self,
        collection_id: &str,
        filter: &ObjectFilter,
    ) -> Result<Vec<ObjectRecord>, sqlx::Error> {
        let mut sql = format!("SELECT {COLUMNS} FROM objects WHERE collection_id = ?");
        sql += &Self::build_filter(filter);
        sql += " ORDER BY dtstart IS NULL, dtstart ASC, uid ASC;";

        let mut executable = sqlx::query_as(&sql).bind(collection_id);
        executable = Self::bind_filter(filter, executable);

        executable.fetch_all(&self.pool).await
    }

    fn build_filter(filter: &ObjectFilter) -> String {
        let mut clauses = String::new();
        if filter.kind.is_some() {
            clauses += " AND kind = ?";
        }
        if filter.window.is_some() {
            // Half-open interval overlap; objects missing either endpoint
            // never match a window.
            clauses += " AND dtstart IS NOT NULL AND dtend IS NOT NULL \
                         AND dtstart < ? AND dtend > ?";
        }
        clauses
    }

    fn bind_filter<'a, O>(
        filter: &'a ObjectFilter,
        mut query: QueryAs<'a, Sqlite, O, SqliteArguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, SqliteArguments<'a>> {
        if let Some(kind) = filter.kind {
            query = query.bind(kind.as_str());
        }
        if let Some(window) = filter.window {
            query = query
                .bind(format_utc(&window.end))
                .bind(format_utc(&window.start));
        }
        query
    }

    pub async fn insert(
        db: impl SqliteExecutor<'_>,
        record: &ObjectRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO objects (id, collection_id, uid, etag, data, kind, summary, description,
    dtstart, dtend, sequence, status, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.collection_id)
            .bind(&record.uid)
            .bind(&record.etag)
            .bind(&record.data)
            .bind(&record.kind)
            .bind(&record.summary)
            .bind(&record.description)
            .bind(&record.dtstart)
            .bind(&record.dtend)
            .bind(record.sequence)
            .bind(&record.status)
            .bind(&record.created_at)
            .bind(&record.updated_at)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Overwrites the mutable columns of an existing object row.
    pub async fn update(
        db: impl SqliteExecutor<'_>,
        record: &ObjectRecord,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
UPDATE objects
SET etag = ?, data = ?, kind = ?, summary = ?, description = ?,
    dtstart = ?, dtend = ?, sequence = ?, status = ?, updated_at = ?
WHERE collection_id = ? AND id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&record.etag)
            .bind(&record.data)
            .bind(&record.kind)
            .bind(&record.summary)
            .bind(&record.description)
            .bind(&record.dtstart)
            .bind(&record.dtend)
            .bind(record.sequence)
            .bind(&record.status)
            .bind(&record.updated_at)
            .bind(&record.collection_id)
            .bind(&record.id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(
        db: impl SqliteExecutor<'_>,
        collection_id: &str,
        object_id: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM objects WHERE collection_id = ? AND id = ?;";

        let result = sqlx::query(SQL)
            .bind(collection_id)
            .bind(object_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_for_collection(
        db: impl SqliteExecutor<'_>,
        collection_id: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM objects WHERE collection_id = ?;";

        let result = sqlx::query(SQL).bind(collection_id).execute(db).await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ObjectRecord {
    pub id: String,
    pub collection_id: String,
    pub uid: String,
    pub etag: String,
    pub data: String,
    pub kind: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub dtstart: Option<String>,
    pub dtend: Option<String>,
    pub sequence: i64,
    pub status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ObjectRecord {
    pub fn into_object(self) -> CalendarObject {
        CalendarObject {
            id: self.id,
            collection_id: self.collection_id,
            uid: self.uid,
            etag: ETag::new(self.etag),
            data: self.data,
            kind: self.kind.parse().unwrap_or(ComponentKind::Event),
            summary: self.summary,
            description: self.description,
            start: self.dtstart.as_deref().and_then(parse_utc),
            end: self.dtend.as_deref().and_then(parse_utc),
            sequence: self.sequence,
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
            created_at: parse_ts(&self.created_at),
            updated_at: parse_ts(&self.updated_at),
        }
    }
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    parse_utc(s).unwrap_or(DateTime::UNIX_EPOCH)
}

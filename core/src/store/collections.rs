// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::Collection;
use crate::datetime::{format_utc, parse_utc};
use crate::types::SyncToken;

/// Data access for the `collections` table.
///
/// Read paths run on the shared pool; mutations take an explicit executor so
/// the caller can batch them into a transaction with the change log.
#[derive(Debug, Clone)]
pub struct Collections {
    pool: SqlitePool,
}

const COLUMNS: &str = "\
id, owner, name, description, color, timezone, sync_token,
is_default, is_public, webdav_enabled, webcal_enabled, created_at, updated_at";

impl Collections {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: &str) -> Result<Option<CollectionRecord>, sqlx::Error> {
        Self::fetch(&self.pool, id).await
    }

    pub async fn fetch(
        db: impl SqliteExecutor<'_>,
        id: &str,
    ) -> Result<Option<CollectionRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM collections WHERE id = ?;");
        sqlx::query_as(&sql).bind(id).fetch_optional(db).await
    }

    pub async fn list_by_owner(&self, owner: &str) -> Result<Vec<CollectionRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM collections WHERE owner = ? ORDER BY created_at ASC, id ASC;");
        sqlx::query_as(&sql).bind(owner).fetch_all(&self.pool).await
    }

    pub async fn find_default(
        &self,
        owner: &str,
    ) -> Result<Option<CollectionRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM collections WHERE owner = ? AND is_default = 1;");
        sqlx::query_as(&sql).bind(owner).fetch_optional(&self.pool).await
    }

    pub async fn insert(
        db: impl SqliteExecutor<'_>,
        record: &CollectionRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO collections (id, owner, name, description, color, timezone, sync_token,
    is_default, is_public, webdav_enabled, webcal_enabled, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.owner)
            .bind(&record.name)
            .bind(&record.description)
            .bind(&record.color)
            .bind(&record.timezone)
            .bind(&record.sync_token)
            .bind(record.is_default)
            .bind(record.is_public)
            .bind(record.webdav_enabled)
            .bind(record.webcal_enabled)
            .bind(&record.created_at)
            .bind(&record.updated_at)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Overwrites the display attributes. The sync token is deliberately not
    /// touched here; collection metadata changes are not synchronized
    /// content changes.
    pub async fn update_display(
        db: impl SqliteExecutor<'_>,
        id: &str,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
        timezone: Option<&str>,
        updated_at: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
UPDATE collections
SET name = ?, description = ?, color = ?, timezone = ?, updated_at = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(name)
            .bind(description)
            .bind(color)
            .bind(timezone)
            .bind(updated_at)
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_sync_token(
        db: impl SqliteExecutor<'_>,
        id: &str,
        token: &SyncToken,
        updated_at: &str,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "UPDATE collections SET sync_token = ?, updated_at = ? WHERE id = ?;";

        sqlx::query(SQL)
            .bind(token.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    pub async fn clear_default(
        db: impl SqliteExecutor<'_>,
        owner: &str,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "UPDATE collections SET is_default = 0 WHERE owner = ?;";

        sqlx::query(SQL).bind(owner).execute(db).await?;
        Ok(())
    }

    pub async fn set_default(db: impl SqliteExecutor<'_>, id: &str) -> Result<(), sqlx::Error> {
        const SQL: &str = "UPDATE collections SET is_default = 1 WHERE id = ?;";

        sqlx::query(SQL).bind(id).execute(db).await?;
        Ok(())
    }

    pub async fn delete(db: impl SqliteExecutor<'_>, id: &str) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM collections WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(db).await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct CollectionRecord {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub timezone: Option<String>,
    pub sync_token: String,
    pub is_default: bool,
    pub is_public: bool,
    pub webdav_enabled: bool,
    pub webcal_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl CollectionRecord {
    pub fn into_collection(self) -> Collection {
        Collection {
            id: self.id,
            owner: self.owner,
            name: self.name,
            description: self.description,
            color: self.color,
            timezone: self.timezone,
            sync_token: SyncToken::new(self.sync_token),
            is_default: self.is_default,
            is_public: self.is_public,
            webdav_enabled: self.webdav_enabled,
            webcal_enabled: self.webcal_enabled,
            created_at: parse_ts(&self.created_at),
            updated_at: parse_ts(&self.updated_at),
        }
    }
}

pub fn record_from_parts(collection: &Collection) -> CollectionRecord {
    CollectionRecord {
        id: collection.id.clone(),
        owner: collection.owner.clone(),
        name: collection.name.clone(),
        description: collection.description.clone(),
        color: collection.color.clone(),
        timezone: collection.timezone.clone(),
        sync_token: collection.sync_token.as_str().to_string(),
        is_default: collection.is_default,
        is_public: collection.is_public,
        webdav_enabled: collection.webdav_enabled,
        webcal_enabled: collection.webcal_enabled,
        created_at: format_utc(&collection.created_at),
        updated_at: format_utc(&collection.updated_at),
    }
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    parse_utc(s).unwrap_or(DateTime::UNIX_EPOCH)
}

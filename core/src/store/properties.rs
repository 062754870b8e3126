// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{SqliteExecutor, SqlitePool};

use crate::types::Href;

/// Data access for the `properties` table (WebDAV dead properties).
///
/// Properties are keyed by `(href, namespace, name)` and addressed by path;
/// they are not tied to the lifetime of any in-memory resource
/// representation.
#[derive(Debug, Clone)]
pub struct Properties {
    pool: SqlitePool,
}

impl Properties {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(
        &self,
        href: &Href,
        namespace: &str,
        name: &str,
    ) -> Result<Option<PropertyRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT href, namespace, name, value
FROM properties
WHERE href = ? AND namespace = ? AND name = ?;
";

        sqlx::query_as(SQL)
            .bind(href.as_str())
            .bind(namespace)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn set(
        db: impl SqliteExecutor<'_>,
        href: &Href,
        namespace: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO properties (href, namespace, name, value)
VALUES (?, ?, ?, ?)
ON CONFLICT(href, namespace, name) DO UPDATE SET
    value = excluded.value;
";

        sqlx::query(SQL)
            .bind(href.as_str())
            .bind(namespace)
            .bind(name)
            .bind(value)
            .execute(db)
            .await?;

        Ok(())
    }

    pub async fn remove(
        db: impl SqliteExecutor<'_>,
        href: &Href,
        namespace: &str,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM properties WHERE href = ? AND namespace = ? AND name = ?;";

        let result = sqlx::query(SQL)
            .bind(href.as_str())
            .bind(namespace)
            .bind(name)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    /// Removes every property stored at or under the given href. Used when
    /// a collection or object is deleted, so no orphaned metadata lingers.
    pub async fn remove_prefix(
        db: impl SqliteExecutor<'_>,
        prefix: &Href,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM properties WHERE href = ? OR href LIKE ? || '%';";

        let result = sqlx::query(SQL)
            .bind(prefix.as_str())
            .bind(prefix.as_str())
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PropertyRecord {
    pub href: String,
    pub namespace: String,
    pub name: String,
    pub value: Option<String>,
}

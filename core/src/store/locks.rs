// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::DateTime;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::datetime::parse_utc;
use crate::lock::{Depth, Lock, LockScope, LockType};
use crate::types::Href;

/// Data access for the `locks` table.
///
/// Every query that feeds a conflict or validation decision filters on
/// `expires_at` itself; an expired row is logically absent even before the
/// sweep removes it.
#[derive(Debug, Clone)]
pub struct Locks {
    pool: SqlitePool,
}

const COLUMNS: &str = "\
token, href, lock_type, scope, depth, owner_info, timeout_secs, expires_at, created_at";

impl Locks {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        db: impl SqliteExecutor<'_>,
        record: &LockRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO locks (token, href, lock_type, scope, depth, owner_info, timeout_secs,
    expires_at, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.token)
            .bind(&record.href)
            .bind(&record.lock_type)
            .bind(&record.scope)
            .bind(&record.depth)
            .bind(&record.owner_info)
            .bind(record.timeout_secs)
            .bind(record.expires_at)
            .bind(&record.created_at)
            .execute(db)
            .await?;

        Ok(())
    }

    pub async fn fetch_active(
        db: impl SqliteExecutor<'_>,
        token: &str,
        now: i64,
    ) -> Result<Option<LockRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM locks WHERE token = ? AND expires_at > ?;");
        sqlx::query_as(&sql)
            .bind(token)
            .bind(now)
            .fetch_optional(db)
            .await
    }

    /// Active locks whose href equals, contains, or is contained by the
    /// given href. This is a coarse candidate set; precise depth and scope
    /// rules are applied by [`Lock::covers`] and [`Lock::blocks`].
    pub async fn list_active_related(
        db: impl SqliteExecutor<'_>,
        href: &Href,
        now: i64,
    ) -> Result<Vec<LockRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM locks \
             WHERE expires_at > ? AND (href = ? OR ? LIKE href || '%' OR href LIKE ? || '%');"
        );
        sqlx::query_as(&sql)
            .bind(now)
            .bind(href.as_str())
            .bind(href.as_str())
            .bind(href.as_str())
            .fetch_all(db)
            .await
    }

    pub async fn refresh(
        db: impl SqliteExecutor<'_>,
        token: &str,
        new_expires_at: i64,
        now: i64,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "UPDATE locks SET expires_at = ? WHERE token = ? AND expires_at > ?;";

        let result = sqlx::query(SQL)
            .bind(new_expires_at)
            .bind(token)
            .bind(now)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(db: impl SqliteExecutor<'_>, token: &str) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM locks WHERE token = ?;";

        let result = sqlx::query(SQL).bind(token).execute(db).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_expired(
        db: impl SqliteExecutor<'_>,
        now: i64,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM locks WHERE expires_at <= ?;";

        let result = sqlx::query(SQL).bind(now).execute(db).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_prefix(
        db: impl SqliteExecutor<'_>,
        prefix: &Href,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM locks WHERE href = ? OR href LIKE ? || '%';";

        let result = sqlx::query(SQL)
            .bind(prefix.as_str())
            .bind(prefix.as_str())
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct LockRecord {
    pub token: String,
    pub href: String,
    pub lock_type: String,
    pub scope: String,
    pub depth: String,
    pub owner_info: Option<String>,
    pub timeout_secs: i64,
    pub expires_at: i64,
    pub created_at: String,
}

impl LockRecord {
    pub fn into_lock(self) -> Lock {
        Lock {
            token: self.token,
            href: Href::new(self.href),
            lock_type: self.lock_type.parse().unwrap_or(LockType::Write),
            scope: self.scope.parse().unwrap_or(LockScope::Exclusive),
            depth: self.depth.parse().unwrap_or(Depth::Zero),
            owner_info: self.owner_info,
            timeout_secs: u32::try_from(self.timeout_secs).unwrap_or(0),
            expires_at: DateTime::from_timestamp(self.expires_at, 0)
                .unwrap_or(DateTime::UNIX_EPOCH),
            created_at: parse_utc(&self.created_at).unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

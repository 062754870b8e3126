// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::types::Href;

/// Lock type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockType {
    /// Read lock.
    Read,
    /// Write lock.
    Write,
}

impl LockType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            LockType::Read => "read",
            LockType::Write => "write",
        }
    }
}

impl FromStr for LockType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(LockType::Read),
            "write" => Ok(LockType::Write),
            _ => Err(()),
        }
    }
}

/// Lock scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockScope {
    /// At most one exclusive lock may cover a path at a time.
    Exclusive,
    /// Shared locks coexist with each other but not with an exclusive one.
    Shared,
}

impl LockScope {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            LockScope::Exclusive => "exclusive",
            LockScope::Shared => "shared",
        }
    }
}

impl FromStr for LockScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclusive" => Ok(LockScope::Exclusive),
            "shared" => Ok(LockScope::Shared),
            _ => Err(()),
        }
    }
}

/// Lock depth, mirroring the WebDAV `Depth` header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Depth {
    /// The resource itself only.
    #[serde(rename = "0")]
    Zero,
    /// The resource and its immediate children.
    #[serde(rename = "1")]
    One,
    /// The resource and all descendants.
    #[serde(rename = "infinity")]
    Infinity,
}

impl Depth {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
            Depth::Infinity => "infinity",
        }
    }
}

impl FromStr for Depth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Depth::Zero),
            "1" => Ok(Depth::One),
            "infinity" => Ok(Depth::Infinity),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active hold over a resource path.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Lock {
    /// Opaque lock token (`urn:uuid:...`).
    pub token: String,

    /// Locked resource path.
    pub href: Href,

    /// Read or write.
    pub lock_type: LockType,

    /// Exclusive or shared.
    pub scope: LockScope,

    /// How far below `href` the lock reaches.
    pub depth: Depth,

    /// Opaque client-supplied owner information.
    pub owner_info: Option<String>,

    /// Requested lifetime in seconds; also the extension granted by refresh.
    pub timeout_secs: u32,

    /// Absolute expiry; past this instant the lock is treated as absent.
    pub expires_at: DateTime<Utc>,

    /// When the lock was granted.
    pub created_at: DateTime<Utc>,
}

impl Lock {
    /// True if this lock covers `href` according to its depth.
    #[must_use]
    pub fn covers(&self, href: &Href) -> bool {
        if self.href == *href {
            return true;
        }
        match self.depth {
            Depth::Zero => false,
            Depth::One => href.is_child_of(&self.href),
            Depth::Infinity => href.is_under(&self.href),
        }
    }

    /// True if this lock blocks a new acquisition of `req` on `target`.
    ///
    /// Shared locks coexist; any exclusive party makes the pair
    /// incompatible. An incompatible lock blocks when it covers the target,
    /// or when the requested depth would reach down to the lock's own root.
    #[must_use]
    pub fn blocks(&self, req: &LockRequest, target: &Href) -> bool {
        let incompatible =
            self.scope == LockScope::Exclusive || req.scope == LockScope::Exclusive;
        if !incompatible {
            return false;
        }
        if self.covers(target) {
            return true;
        }
        match req.depth {
            Depth::Zero => false,
            Depth::One => self.href.is_child_of(target),
            Depth::Infinity => self.href.is_under(target),
        }
    }
}

/// Parameters of a lock acquisition.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LockRequest {
    /// Read or write.
    pub lock_type: LockType,

    /// Exclusive or shared.
    pub scope: LockScope,

    /// Requested depth.
    pub depth: Depth,

    /// Requested lifetime in seconds; `None` uses the configured default.
    #[serde(default)]
    pub timeout_secs: Option<u32>,

    /// Opaque owner information supplied by the client.
    #[serde(default)]
    pub owner_info: Option<String>,
}

impl LockRequest {
    /// An exclusive write lock on the resource itself, the common case for
    /// WebDAV `LOCK` requests.
    #[must_use]
    pub fn exclusive_write() -> Self {
        Self {
            lock_type: LockType::Write,
            scope: LockScope::Exclusive,
            depth: Depth::Zero,
            timeout_secs: None,
            owner_info: None,
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Resource href (path).
///
/// A `Href` addresses a resource inside the store, such as
/// `/calendars/alice/8f2c.../standup.ics`. Locks and dead properties are
/// keyed by href and survive the in-memory representation of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Href(String);

impl Href {
    /// Creates a new `Href` from a string.
    #[must_use]
    pub const fn new(href: String) -> Self {
        Self(href)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `self` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_under(&self, ancestor: &Href) -> bool {
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(&ancestor.0)
            && (ancestor.0.ends_with('/') || self.0.as_bytes().get(ancestor.0.len()) == Some(&b'/'))
    }

    /// True if `self` is exactly one level below `parent`.
    #[must_use]
    pub fn is_child_of(&self, parent: &Href) -> bool {
        if !self.is_under(parent) {
            return false;
        }
        let rest = &self.0[parent.0.len()..];
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        !rest.trim_end_matches('/').contains('/')
    }
}

impl Deref for Href {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

/// Entity tag for optimistic concurrency.
///
/// A fresh `ETag` is assigned on every successful write of an object and is
/// never reused, so comparing tags detects any intervening change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Creates a new `ETag` from a string.
    #[must_use]
    pub const fn new(etag: String) -> Self {
        Self(etag)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ETag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ETag {
    fn from(etag: String) -> Self {
        Self(etag)
    }
}

impl From<&str> for ETag {
    fn from(etag: &str) -> Self {
        Self(etag.to_string())
    }
}

/// Opaque per-collection sync cursor.
///
/// Replaced atomically with every contained mutation; clients hand it back
/// to ask "what changed since".
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SyncToken(String);

impl SyncToken {
    /// Creates a new `SyncToken` from a string.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SyncToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SyncToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// iCalendar component kind of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComponentKind {
    /// `VEVENT`
    Event,
    /// `VTODO`
    Todo,
    /// `VJOURNAL`
    Journal,
    /// `VFREEBUSY`
    FreeBusy,
}

impl ComponentKind {
    /// The iCalendar component name, e.g. `VEVENT`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Event => "VEVENT",
            ComponentKind::Todo => "VTODO",
            ComponentKind::Journal => "VJOURNAL",
            ComponentKind::FreeBusy => "VFREEBUSY",
        }
    }
}

impl FromStr for ComponentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VEVENT" => Ok(ComponentKind::Event),
            "VTODO" => Ok(ComponentKind::Todo),
            "VJOURNAL" => Ok(ComponentKind::Journal),
            "VFREEBUSY" => Ok(ComponentKind::FreeBusy),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object status from the iCalendar `STATUS` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ObjectStatus {
    /// `TENTATIVE`
    Tentative,
    /// `CONFIRMED`
    Confirmed,
    /// `CANCELLED`
    Cancelled,
}

impl ObjectStatus {
    /// The iCalendar property value, e.g. `CONFIRMED`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectStatus::Tentative => "TENTATIVE",
            ObjectStatus::Confirmed => "CONFIRMED",
            ObjectStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for ObjectStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TENTATIVE" => Ok(ObjectStatus::Tentative),
            "CONFIRMED" => Ok(ObjectStatus::Confirmed),
            "CANCELLED" => Ok(ObjectStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

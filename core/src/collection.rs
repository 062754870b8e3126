// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};

use crate::types::SyncToken;

/// Maximum length of a collection display name.
pub const MAX_NAME_LEN: usize = 255;

/// A named grouping of calendar objects owned by one principal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Collection {
    /// Opaque, globally unique identifier.
    pub id: String,

    /// Owning principal.
    pub owner: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    pub description: Option<String>,

    /// Display color, e.g. `#ff4400`.
    pub color: Option<String>,

    /// IANA timezone name, e.g. `Europe/Berlin`.
    pub timezone: Option<String>,

    /// Current sync cursor; replaced on every contained mutation.
    pub sync_token: SyncToken,

    /// A principal's default collection is never deletable.
    pub is_default: bool,

    /// Public collections are readable by principals other than the owner.
    pub is_public: bool,

    /// Whether the WebDAV surface is enabled for this collection.
    pub webdav_enabled: bool,

    /// Whether the read-only webcal feed is enabled for this collection.
    pub webcal_enabled: bool,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last metadata or content update time.
    pub updated_at: DateTime<Utc>,
}

/// Attributes for creating a collection.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CollectionDraft {
    /// Display name; must be non-empty and at most [`MAX_NAME_LEN`] chars.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Display color.
    #[serde(default)]
    pub color: Option<String>,

    /// IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Marks the collection as the owner's default. At most one default
    /// exists per owner; creating a new one clears the previous flag.
    #[serde(default)]
    pub is_default: bool,

    /// Makes the collection readable by other principals.
    #[serde(default)]
    pub is_public: bool,

    /// Enables the WebDAV surface.
    #[serde(default = "default_true")]
    pub webdav_enabled: bool,

    /// Enables the read-only webcal feed.
    #[serde(default = "default_true")]
    pub webcal_enabled: bool,
}

impl CollectionDraft {
    /// A draft with the given name and default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
            timezone: None,
            is_default: false,
            is_public: false,
            webdav_enabled: true,
            webcal_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Partial update of a collection's display attributes.
///
/// Only display attributes are patchable; flags and ownership are managed
/// through dedicated operations, and none of these rotate the sync token.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CollectionPatch {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,

    /// New description; `Some(None)` clears it.
    #[serde(default)]
    pub description: Option<Option<String>>,

    /// New color; `Some(None)` clears it.
    #[serde(default)]
    pub color: Option<Option<String>>,

    /// New timezone; `Some(None)` clears it.
    #[serde(default)]
    pub timezone: Option<Option<String>>,
}

impl CollectionPatch {
    /// True if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.timezone.is_none()
    }
}

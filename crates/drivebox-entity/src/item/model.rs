//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use drivebox_core::types::{ItemId, OwnerId};

use super::kind::ItemKind;

/// A node in a user's drive tree: either a folder or a file.
///
/// The tree is an adjacency list: `parent_id` points at the containing
/// folder, `None` means root level. Every non-null `parent_id` must
/// reference an existing item of kind `folder` owned by the same user —
/// the Item Store enforces this on insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier, assigned on insert.
    pub id: ItemId,
    /// Display name; mutable by rename.
    pub name: String,
    /// Folder/file discriminator; immutable after creation.
    pub kind: ItemKind,
    /// Byte count; `None` for folders.
    pub size: Option<i64>,
    /// Storage key of the file's bytes in the object store.
    ///
    /// `None` for folders. A fresh access URL can always be re-derived
    /// from this key.
    pub object_key: Option<String>,
    /// Last-issued, time-limited URL for fetching the file's bytes.
    ///
    /// A performance cache, not a source of truth; may be stale.
    pub access_url: Option<String>,
    /// Containing folder, or `None` for a root-level item.
    pub parent_id: Option<ItemId>,
    /// For folders, the cached count of direct children.
    ///
    /// Recomputed with a full recount after every structural mutation.
    pub item_count: Option<i32>,
    /// The owning user (opaque identity-collaborator string).
    pub owner_id: OwnerId,
    /// Public share token; non-null exactly when `is_public` is true.
    pub share_id: Option<String>,
    /// Whether the item (and, for folders, its subtree) is publicly readable.
    pub is_public: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Item {
    /// Whether this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Whether this item lives at the root level.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Display name.
    pub name: String,
    /// Folder/file discriminator.
    pub kind: ItemKind,
    /// Byte count for files; `None` for folders.
    pub size: Option<i64>,
    /// Object-store key for files whose upload has completed.
    pub object_key: Option<String>,
    /// Initial access URL, if one was already issued.
    pub access_url: Option<String>,
    /// Containing folder (`None` for root).
    pub parent_id: Option<ItemId>,
    /// The owning user.
    pub owner_id: OwnerId,
}

impl CreateItem {
    /// A new empty folder.
    pub fn folder(name: impl Into<String>, parent_id: Option<ItemId>, owner_id: OwnerId) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Folder,
            size: None,
            object_key: None,
            access_url: None,
            parent_id,
            owner_id,
        }
    }
}

/// Partial update of an item.
///
/// Outer `None` means "leave unchanged"; for nullable columns the inner
/// `Option` carries the new value, so `Some(None)` clears the column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New display name.
    pub name: Option<String>,
    /// New parent folder (`Some(None)` moves to root).
    pub parent_id: Option<Option<ItemId>>,
    /// New cached child count.
    pub item_count: Option<i32>,
    /// New byte count.
    pub size: Option<i64>,
    /// New object-store key.
    pub object_key: Option<Option<String>>,
    /// New cached access URL.
    pub access_url: Option<Option<String>>,
    /// New share token.
    pub share_id: Option<Option<String>>,
    /// New public visibility.
    pub is_public: Option<bool>,
}

impl ItemPatch {
    /// Patch that renames the item.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that reparents the item.
    pub fn reparent(parent_id: Option<ItemId>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    /// Patch that publishes the item under a share token.
    pub fn publish(share_id: impl Into<String>) -> Self {
        Self {
            share_id: Some(Some(share_id.into())),
            is_public: Some(true),
            ..Self::default()
        }
    }

    /// Patch that stores a freshly issued access URL.
    pub fn access_url(url: impl Into<String>) -> Self {
        Self {
            access_url: Some(Some(url.into())),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.item_count.is_none()
            && self.size.is_none()
            && self.object_key.is_none()
            && self.access_url.is_none()
            && self.share_id.is_none()
            && self.is_public.is_none()
    }
}

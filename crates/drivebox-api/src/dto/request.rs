//! Request DTOs.

use serde::{Deserialize, Serialize};

use drivebox_core::types::ItemId;

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

/// Rename request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameItemRequest {
    /// The new display name.
    pub name: String,
}

/// Move request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveItemRequest {
    /// New parent folder ID; omit or null to move to root.
    #[serde(default)]
    pub new_parent_id: Option<ItemId>,
}

/// Presigned-upload request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignUploadRequest {
    /// Original file name.
    pub name: String,
    /// MIME type the browser will upload with.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Destination folder (None for root).
    #[serde(default)]
    pub folder_id: Option<ItemId>,
}

/// Upload-completion request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteUploadRequest {
    /// The storage key returned by the presign call.
    pub object_key: String,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Destination folder (None for root).
    #[serde(default)]
    pub folder_id: Option<ItemId>,
}

/// Share-link creation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// The item to publish.
    pub item_id: ItemId,
}

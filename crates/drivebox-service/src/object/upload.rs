//! The presigned upload flow: issue a target, then record the completed
//! upload as an item row.
//!
//! Rows are created only after the object exists in the store, so an
//! aborted upload leaves no placeholder row to reconcile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::{CreateItem, Item, ItemKind};

use crate::context::RequestContext;
use crate::object::resolver::{ObjectUrlResolver, UploadTarget};

/// Parameters for requesting an upload target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Original file name.
    pub name: String,
    /// MIME type the browser will send.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Destination folder (`None` = root).
    pub folder_id: Option<ItemId>,
}

/// Parameters for recording a completed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteUpload {
    /// The storage key returned with the upload target.
    pub object_key: String,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Destination folder (`None` = root).
    pub folder_id: Option<ItemId>,
}

/// Orchestrates the two-step presigned upload flow.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Arc<dyn ItemStore>,
    resolver: Arc<ObjectUrlResolver>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(store: Arc<dyn ItemStore>, resolver: Arc<ObjectUrlResolver>) -> Self {
        Self { store, resolver }
    }

    fn validate_fields(name: &str, content_type: &str, size: i64) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if content_type.trim().is_empty() {
            return Err(AppError::validation("Content type is required"));
        }
        if size <= 0 {
            return Err(AppError::validation("Size must be a positive byte count"));
        }
        Ok(())
    }

    /// Verify the destination folder exists, is a folder, and is owned.
    async fn validate_destination(
        &self,
        ctx: &RequestContext,
        folder_id: ItemId,
    ) -> AppResult<()> {
        let folder = self
            .store
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        if folder.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own the destination folder"));
        }
        if !folder.is_folder() {
            return Err(AppError::validation(format!(
                "Destination {folder_id} is not a folder"
            )));
        }
        Ok(())
    }

    /// Issue a presigned upload target for a new file.
    pub async fn issue_upload_target(
        &self,
        ctx: &RequestContext,
        req: &UploadRequest,
    ) -> AppResult<UploadTarget> {
        Self::validate_fields(&req.name, &req.content_type, req.size)?;
        if let Some(folder_id) = req.folder_id {
            self.validate_destination(ctx, folder_id).await?;
        }
        self.resolver
            .issue_upload_target(&req.name, &req.content_type)
            .await
    }

    /// Record a completed upload as an item row.
    ///
    /// Classifies the MIME type into an [`ItemKind`], issues the first
    /// access URL, inserts the row, and recounts the destination folder.
    pub async fn complete_upload(
        &self,
        ctx: &RequestContext,
        req: &CompleteUpload,
    ) -> AppResult<Item> {
        Self::validate_fields(&req.name, &req.content_type, req.size)?;
        if req.object_key.trim().is_empty() {
            return Err(AppError::validation("Object key is required"));
        }
        if let Some(folder_id) = req.folder_id {
            self.validate_destination(ctx, folder_id).await?;
        }

        let kind = ItemKind::from_mime(&req.content_type);
        let access_url = self.resolver.issue_access_url(&req.object_key).await?;

        let item = self
            .store
            .insert(&CreateItem {
                name: req.name.trim().to_string(),
                kind,
                size: Some(req.size),
                object_key: Some(req.object_key.clone()),
                access_url: Some(access_url.clone()),
                parent_id: req.folder_id,
                owner_id: ctx.owner_id.clone(),
            })
            .await?;

        if let Some(folder_id) = req.folder_id {
            self.store.recount_item_count(folder_id).await?;
        }
        self.resolver.remember_url(item.id, &access_url).await;

        info!(
            owner_id = %ctx.owner_id,
            item_id = %item.id,
            kind = %kind,
            size = req.size,
            "Upload recorded"
        );
        Ok(item)
    }
}

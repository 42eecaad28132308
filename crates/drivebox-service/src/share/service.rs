//! The Sharing Gate: public visibility derived from share-link metadata.

use std::sync::Arc;

use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::{Item, ItemPatch};

use crate::context::RequestContext;
use crate::share::token::ShareTokenGenerator;

/// Grants read-only cross-owner visibility without transferring ownership.
#[derive(Debug, Clone)]
pub struct ShareService {
    store: Arc<dyn ItemStore>,
    tokens: ShareTokenGenerator,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            tokens: ShareTokenGenerator::new(),
        }
    }

    /// Create (or return the existing) share link for an owned item.
    ///
    /// Idempotent: an item that already carries a token keeps it, and
    /// `is_public` is re-asserted in case it was flipped off.
    pub async fn create_share_link(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> AppResult<String> {
        let item = self
            .store
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {item_id} not found")))?;
        if item.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own this item"));
        }

        if let Some(existing) = item.share_id {
            if !item.is_public {
                self.store
                    .update(
                        item_id,
                        &ItemPatch {
                            is_public: Some(true),
                            ..ItemPatch::default()
                        },
                    )
                    .await?;
            }
            return Ok(existing);
        }

        let token = self.tokens.generate();
        self.store
            .update(item_id, &ItemPatch::publish(token.clone()))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {item_id} not found")))?;

        info!(owner_id = %ctx.owner_id, item_id = %item_id, "Share link created");
        Ok(token)
    }

    /// Resolve a share token to its item.
    ///
    /// An unknown token and a token pointing at a now-private item are
    /// indistinguishable to the caller — both are "not found", so the
    /// existence of private items never leaks.
    pub async fn resolve_share(&self, token: &str) -> AppResult<Item> {
        self.store
            .find_by_share_token(token)
            .await?
            .filter(|item| item.is_public)
            .ok_or_else(|| AppError::not_found("Shared item not found"))
    }

    /// List the direct children of a publicly shared folder.
    ///
    /// Children inherit visibility from the shared ancestor: they are
    /// returned regardless of their own `is_public` flags, but only while
    /// the folder itself is public. Anything else yields an empty list.
    pub async fn public_folder_contents(&self, folder_id: ItemId) -> AppResult<Vec<Item>> {
        match self.store.find_by_id(folder_id).await? {
            Some(folder) if folder.is_folder() && folder.is_public => {
                self.store.find_children_unscoped(folder_id).await
            }
            _ => Ok(Vec::new()),
        }
    }
}

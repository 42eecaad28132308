//! Item CRUD and structural tree maintenance.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::{CreateItem, Item, ItemPatch};

use crate::context::RequestContext;
use crate::item::tree::TreeService;
use crate::object::resolver::ObjectUrlResolver;

/// Manages item CRUD and keeps the tree invariants intact.
#[derive(Debug, Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    tree: Arc<TreeService>,
    resolver: Arc<ObjectUrlResolver>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(
        store: Arc<dyn ItemStore>,
        tree: Arc<TreeService>,
        resolver: Arc<ObjectUrlResolver>,
    ) -> Self {
        Self {
            store,
            tree,
            resolver,
        }
    }

    /// List the caller's root-level items.
    pub async fn list_root(&self, ctx: &RequestContext) -> AppResult<Vec<Item>> {
        self.store.find_roots(&ctx.owner_id).await
    }

    /// Fetch an item the caller owns.
    pub async fn get_item(&self, ctx: &RequestContext, id: ItemId) -> AppResult<Item> {
        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        if item.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own this item"));
        }
        Ok(item)
    }

    /// List the direct children of a folder the caller owns.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        folder_id: ItemId,
    ) -> AppResult<Vec<Item>> {
        let folder = self.get_item(ctx, folder_id).await?;
        if !folder.is_folder() {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }
        self.store.find_children(folder_id, &ctx.owner_id).await
    }

    /// Create a new folder, at root level or under an owned parent folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<ItemId>,
    ) -> AppResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent_id) = parent_id {
            let parent = self.get_item(ctx, parent_id).await?;
            if !parent.is_folder() {
                return Err(AppError::validation(format!(
                    "Parent item {parent_id} is not a folder"
                )));
            }
        }

        let folder = self
            .store
            .insert(&CreateItem::folder(name, parent_id, ctx.owner_id.clone()))
            .await?;

        if let Some(parent_id) = parent_id {
            self.store.recount_item_count(parent_id).await?;
        }

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Rename an item.
    pub async fn rename_item(
        &self,
        ctx: &RequestContext,
        id: ItemId,
        new_name: &str,
    ) -> AppResult<Item> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }

        self.get_item(ctx, id).await?;
        let updated = self
            .store
            .update(id, &ItemPatch::rename(new_name))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        info!(owner_id = %ctx.owner_id, item_id = %id, new_name, "Item renamed");
        Ok(updated)
    }

    /// Move an item to a new parent folder (`None` = move to root).
    ///
    /// Rejects moves that would put a folder inside its own subtree; no
    /// partial state change occurs on rejection.
    pub async fn move_item(
        &self,
        ctx: &RequestContext,
        id: ItemId,
        new_parent_id: Option<ItemId>,
    ) -> AppResult<Item> {
        let item = self.get_item(ctx, id).await?;

        if let Some(parent_id) = new_parent_id {
            let parent = self.get_item(ctx, parent_id).await?;
            if !parent.is_folder() {
                return Err(AppError::validation(format!(
                    "Target parent {parent_id} is not a folder"
                )));
            }
            self.tree.assert_no_cycle(id, parent_id).await?;
        }

        let old_parent_id = item.parent_id;
        let updated = self
            .store
            .update(id, &ItemPatch::reparent(new_parent_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        if let Some(old_parent) = old_parent_id {
            self.store.recount_item_count(old_parent).await?;
        }
        if let Some(new_parent) = new_parent_id {
            self.store.recount_item_count(new_parent).await?;
        }

        info!(
            owner_id = %ctx.owner_id,
            item_id = %id,
            new_parent = ?new_parent_id,
            "Item moved"
        );
        Ok(updated)
    }

    /// Delete an item; for folders the whole subtree goes with it.
    ///
    /// Idempotent: deleting an id that no longer exists returns `false`.
    /// External objects are cleaned up best-effort — a failure there never
    /// blocks the row deletion. Not transactional across the subtree: a
    /// crash mid-delete leaves a smaller tree that a re-run finishes off.
    pub async fn delete_item(&self, ctx: &RequestContext, id: ItemId) -> AppResult<bool> {
        let Some(item) = self.store.find_by_id(id).await? else {
            return Ok(false);
        };
        if item.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own this item"));
        }

        // Collect the subtree breadth-first, then delete in reverse so
        // children always go before their parent. The visited set guards
        // against corrupted parent chains.
        let mut ordered = vec![item.clone()];
        let mut visited: HashSet<ItemId> = HashSet::from([item.id]);
        let mut cursor = 0;
        while cursor < ordered.len() {
            if ordered[cursor].is_folder() {
                let children = self.store.find_children_unscoped(ordered[cursor].id).await?;
                for child in children {
                    if visited.insert(child.id) {
                        ordered.push(child);
                    }
                }
            }
            cursor += 1;
        }

        let removed = ordered.len();
        for node in ordered.iter().rev() {
            self.resolver.cleanup_object(node).await;
            self.store.delete(node.id).await?;
        }

        if let Some(parent_id) = item.parent_id {
            self.store.recount_item_count(parent_id).await?;
        }

        info!(
            owner_id = %ctx.owner_id,
            item_id = %id,
            removed,
            "Item deleted"
        );
        Ok(true)
    }

    /// Case-insensitive name search over the caller's items.
    pub async fn search(&self, ctx: &RequestContext, fragment: &str) -> AppResult<Vec<Item>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }
        self.store.search_by_name(fragment, &ctx.owner_id).await
    }
}

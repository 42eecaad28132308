//! Breadcrumb reconstruction and ancestor-chain walks.

use std::sync::Arc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::Breadcrumb;

use crate::context::RequestContext;

/// Maximum number of parent hops any upward walk will follow.
///
/// The store validates parents at write time but does not prove global
/// acyclicity, so every walk carries this cap instead of trusting the
/// data: a corrupted chain yields a partial path, not an infinite loop.
pub const MAX_TREE_DEPTH: usize = 20;

/// Navigation views over the folder tree.
#[derive(Debug, Clone)]
pub struct TreeService {
    store: Arc<dyn ItemStore>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Reconstruct the breadcrumb path from the synthetic root to a folder.
    ///
    /// The first entry is always the synthetic `"root"` / "My Drive" crumb;
    /// the last is the target folder itself. The walk stops at
    /// [`MAX_TREE_DEPTH`] hops and returns the partial path.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: ItemId,
    ) -> AppResult<Vec<Breadcrumb>> {
        let folder = self
            .store
            .find_by_id(folder_id)
            .await?
            .filter(|i| i.is_folder())
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if folder.owner_id != ctx.owner_id {
            return Err(AppError::forbidden("You do not own this folder"));
        }

        let mut path = std::collections::VecDeque::new();
        path.push_front(Breadcrumb::from_item(&folder));

        let mut current = folder.parent_id;
        let mut hops = 0;
        while let Some(parent_id) = current {
            if hops >= MAX_TREE_DEPTH {
                tracing::warn!(
                    folder_id = %folder_id,
                    "Breadcrumb walk exceeded maximum depth; returning partial path"
                );
                break;
            }
            let Some(parent) = self.store.find_by_id(parent_id).await? else {
                break;
            };
            current = parent.parent_id;
            path.push_front(Breadcrumb::from_item(&parent));
            hops += 1;
        }

        path.push_front(Breadcrumb::root());
        Ok(path.into_iter().collect())
    }

    /// Reject a reparenting that would create a cycle.
    ///
    /// Walks the prospective parent's ancestor chain and fails if the moved
    /// item appears anywhere on it (or is the prospective parent itself).
    /// A chain deeper than [`MAX_TREE_DEPTH`] is rejected the same way
    /// rather than trusted.
    pub async fn assert_no_cycle(
        &self,
        item_id: ItemId,
        new_parent_id: ItemId,
    ) -> AppResult<()> {
        if new_parent_id == item_id {
            return Err(AppError::cycle("Cannot move an item into itself"));
        }

        let mut current = Some(new_parent_id);
        let mut hops = 0;
        while let Some(ancestor_id) = current {
            if ancestor_id == item_id {
                return Err(AppError::cycle(
                    "Cannot move an item into one of its descendants",
                ));
            }
            if hops >= MAX_TREE_DEPTH {
                return Err(AppError::cycle(
                    "Ancestor chain exceeds the maximum tree depth",
                ));
            }
            current = match self.store.find_by_id(ancestor_id).await? {
                Some(ancestor) => ancestor.parent_id,
                None => None,
            };
            hops += 1;
        }
        Ok(())
    }
}

//! The Item Store: durable persistence and point lookups for drive items.
//!
//! The trait is the seam between the tree/sharing logic and the backing
//! store. [`postgres::PgItemStore`] is the production implementation;
//! [`memory::MemoryItemStore`] mirrors its semantics in-process and backs
//! the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use drivebox_core::result::AppResult;
use drivebox_core::types::{ItemId, OwnerId};
use drivebox_entity::item::{CreateItem, Item, ItemPatch};

/// Persistence contract for drive items.
///
/// All listing operations return rows ordered by name ascending (id as a
/// tiebreaker). Owner-scoped methods never return another owner's rows;
/// the unscoped variants exist for the Sharing Gate and cascade deletion,
/// whose visibility rules are enforced a layer above.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an item by id, regardless of owner.
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// List the direct children of a folder belonging to the owner.
    async fn find_children(&self, folder_id: ItemId, owner: &OwnerId) -> AppResult<Vec<Item>>;

    /// List the direct children of a folder regardless of owner scoping.
    async fn find_children_unscoped(&self, folder_id: ItemId) -> AppResult<Vec<Item>>;

    /// List the owner's root-level items (`parent_id IS NULL`).
    async fn find_roots(&self, owner: &OwnerId) -> AppResult<Vec<Item>>;

    /// Insert a new item, assigning its id and timestamps.
    ///
    /// Fails with a validation error if `parent_id` does not resolve to an
    /// existing folder owned by the same user.
    async fn insert(&self, data: &CreateItem) -> AppResult<Item>;

    /// Apply a partial update; returns `None` if the id is unknown.
    ///
    /// `modified_at` advances on every successful update.
    async fn update(&self, id: ItemId, patch: &ItemPatch) -> AppResult<Option<Item>>;

    /// Remove exactly one row; returns `false` if the id was unknown.
    ///
    /// Does not cascade — cascading is the tree layer's responsibility.
    async fn delete(&self, id: ItemId) -> AppResult<bool>;

    /// Case-insensitive substring match over `name`, scoped to the owner.
    async fn search_by_name(&self, fragment: &str, owner: &OwnerId) -> AppResult<Vec<Item>>;

    /// Count the direct children of a folder.
    async fn count_children(&self, folder_id: ItemId) -> AppResult<i64>;

    /// Recompute a folder's cached `item_count` from a full recount.
    ///
    /// A no-op if the id no longer exists or is not a folder.
    async fn recount_item_count(&self, folder_id: ItemId) -> AppResult<()>;

    /// Find an item by its share token, regardless of visibility.
    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Item>>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

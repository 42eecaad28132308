//! In-memory Item Store implementation.
//!
//! Mirrors the PostgreSQL store's observable semantics — owner scoping,
//! name-ascending listings, parent validation, timestamp advancement —
//! without a database. Backs the test suite and local experimentation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::{ItemId, OwnerId};
use drivebox_entity::item::{CreateItem, Item, ItemPatch};

use super::ItemStore;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Item>,
}

/// Item Store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_name(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    items
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id.into_inner()).cloned())
    }

    async fn find_children(&self, folder_id: ItemId, owner: &OwnerId) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        let items = inner
            .rows
            .values()
            .filter(|i| i.parent_id == Some(folder_id) && &i.owner_id == owner)
            .cloned()
            .collect();
        Ok(sort_by_name(items))
    }

    async fn find_children_unscoped(&self, folder_id: ItemId) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        let items = inner
            .rows
            .values()
            .filter(|i| i.parent_id == Some(folder_id))
            .cloned()
            .collect();
        Ok(sort_by_name(items))
    }

    async fn find_roots(&self, owner: &OwnerId) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        let items = inner
            .rows
            .values()
            .filter(|i| i.parent_id.is_none() && &i.owner_id == owner)
            .cloned()
            .collect();
        Ok(sort_by_name(items))
    }

    async fn insert(&self, data: &CreateItem) -> AppResult<Item> {
        let mut inner = self.inner.write().await;

        if let Some(parent_id) = data.parent_id {
            match inner.rows.get(&parent_id.into_inner()) {
                Some(p) if p.is_folder() && p.owner_id == data.owner_id => {}
                Some(p) if !p.is_folder() => {
                    return Err(AppError::validation(format!(
                        "Parent item {parent_id} is not a folder"
                    )));
                }
                _ => {
                    return Err(AppError::validation(format!(
                        "Parent folder {parent_id} does not exist"
                    )));
                }
            }
        }

        inner.next_id += 1;
        let now = Utc::now();
        let item = Item {
            id: ItemId::from_raw(inner.next_id),
            name: data.name.clone(),
            kind: data.kind,
            size: data.size,
            object_key: data.object_key.clone(),
            access_url: data.access_url.clone(),
            parent_id: data.parent_id,
            item_count: data.kind.is_folder().then_some(0),
            owner_id: data.owner_id.clone(),
            share_id: None,
            is_public: false,
            created_at: now,
            modified_at: now,
        };
        inner.rows.insert(item.id.into_inner(), item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> AppResult<Option<Item>> {
        let mut inner = self.inner.write().await;
        let Some(item) = inner.rows.get_mut(&id.into_inner()) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            item.name = name.clone();
        }
        if let Some(parent_id) = &patch.parent_id {
            item.parent_id = *parent_id;
        }
        if let Some(item_count) = patch.item_count {
            item.item_count = Some(item_count);
        }
        if let Some(size) = patch.size {
            item.size = Some(size);
        }
        if let Some(object_key) = &patch.object_key {
            item.object_key = object_key.clone();
        }
        if let Some(access_url) = &patch.access_url {
            item.access_url = access_url.clone();
        }
        if let Some(share_id) = &patch.share_id {
            item.share_id = share_id.clone();
        }
        if let Some(is_public) = patch.is_public {
            item.is_public = is_public;
        }
        item.modified_at = Utc::now();

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: ItemId) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id.into_inner()).is_some())
    }

    async fn search_by_name(&self, fragment: &str, owner: &OwnerId) -> AppResult<Vec<Item>> {
        let needle = fragment.to_lowercase();
        let inner = self.inner.read().await;
        let items = inner
            .rows
            .values()
            .filter(|i| &i.owner_id == owner && i.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(sort_by_name(items))
    }

    async fn count_children(&self, folder_id: ItemId) -> AppResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|i| i.parent_id == Some(folder_id))
            .count() as i64)
    }

    async fn recount_item_count(&self, folder_id: ItemId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let count = inner
            .rows
            .values()
            .filter(|i| i.parent_id == Some(folder_id))
            .count() as i32;
        if let Some(folder) = inner.rows.get_mut(&folder_id.into_inner()) {
            if folder.is_folder() {
                folder.item_count = Some(count);
            }
        }
        Ok(())
    }

    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Item>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .find(|i| i.share_id.as_deref() == Some(token))
            .cloned())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_entity::item::ItemKind;

    fn owner() -> OwnerId {
        OwnerId::new("u1")
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_counts() {
        let store = MemoryItemStore::new();
        let folder = store
            .insert(&CreateItem::folder("Docs", None, owner()))
            .await
            .unwrap();
        assert!(folder.is_folder());
        assert_eq!(folder.item_count, Some(0));

        let file = store
            .insert(&CreateItem {
                name: "a.pdf".to_string(),
                kind: ItemKind::Pdf,
                size: Some(100),
                object_key: Some("k1".to_string()),
                access_url: None,
                parent_id: Some(folder.id),
                owner_id: owner(),
            })
            .await
            .unwrap();
        assert!(file.item_count.is_none());
        assert_ne!(file.id, folder.id);
        assert_eq!(store.count_children(folder.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_or_non_folder_parent() {
        let store = MemoryItemStore::new();
        let err = store
            .insert(&CreateItem::folder("x", Some(ItemId::from_raw(99)), owner()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);

        let folder = store
            .insert(&CreateItem::folder("Docs", None, owner()))
            .await
            .unwrap();
        let file = store
            .insert(&CreateItem {
                name: "a.txt".to_string(),
                kind: ItemKind::Other,
                size: Some(1),
                object_key: None,
                access_url: None,
                parent_id: Some(folder.id),
                owner_id: owner(),
            })
            .await
            .unwrap();
        let err = store
            .insert(&CreateItem::folder("y", Some(file.id), owner()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_insert_rejects_foreign_parent() {
        let store = MemoryItemStore::new();
        let folder = store
            .insert(&CreateItem::folder("Docs", None, owner()))
            .await
            .unwrap();
        let err = store
            .insert(&CreateItem::folder("x", Some(folder.id), OwnerId::new("u2")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_listings_are_name_ordered_and_owner_scoped() {
        let store = MemoryItemStore::new();
        store
            .insert(&CreateItem::folder("beta", None, owner()))
            .await
            .unwrap();
        store
            .insert(&CreateItem::folder("alpha", None, owner()))
            .await
            .unwrap();
        store
            .insert(&CreateItem::folder("theirs", None, OwnerId::new("u2")))
            .await
            .unwrap();

        let roots = store.find_roots(&owner()).await.unwrap();
        let names: Vec<_> = roots.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = MemoryItemStore::new();
        let res = store
            .update(ItemId::from_raw(1), &ItemPatch::rename("x"))
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let store = MemoryItemStore::new();
        store
            .insert(&CreateItem::folder("Quarterly Reports", None, owner()))
            .await
            .unwrap();
        let hits = store.search_by_name("report", &owner()).await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = store.search_by_name("budget", &owner()).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_share_token_lookup() {
        let store = MemoryItemStore::new();
        let folder = store
            .insert(&CreateItem::folder("Docs", None, owner()))
            .await
            .unwrap();
        store
            .update(folder.id, &ItemPatch::publish("tok1"))
            .await
            .unwrap();
        let found = store.find_by_share_token("tok1").await.unwrap().unwrap();
        assert_eq!(found.id, folder.id);
        assert!(found.is_public);
        assert!(store.find_by_share_token("nope").await.unwrap().is_none());
    }
}

//! PostgreSQL Item Store implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::types::{ItemId, OwnerId};
use drivebox_entity::item::{CreateItem, Item, ItemPatch};

use super::ItemStore;

/// Item Store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify that `parent_id` references an existing folder of `owner`.
    async fn validate_parent(&self, parent_id: ItemId, owner: &OwnerId) -> AppResult<()> {
        let parent = self.find_by_id(parent_id).await?;
        match parent {
            Some(p) if p.is_folder() && &p.owner_id == owner => Ok(()),
            Some(p) if !p.is_folder() => Err(AppError::validation(format!(
                "Parent item {parent_id} is not a folder"
            ))),
            _ => Err(AppError::validation(format!(
                "Parent folder {parent_id} does not exist"
            ))),
        }
    }
}

/// Escape `%`, `_`, and `\` so a search fragment matches literally in ILIKE.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn find_children(&self, folder_id: ItemId, owner: &OwnerId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE parent_id = $1 AND owner_id = $2 ORDER BY name ASC, id ASC",
        )
        .bind(folder_id)
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_children_unscoped(&self, folder_id: ItemId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE parent_id = $1 ORDER BY name ASC, id ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_roots(&self, owner: &OwnerId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE parent_id IS NULL AND owner_id = $1 \
             ORDER BY name ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root items", e))
    }

    async fn insert(&self, data: &CreateItem) -> AppResult<Item> {
        if let Some(parent_id) = data.parent_id {
            self.validate_parent(parent_id, &data.owner_id).await?;
        }

        // Folders start with an explicit zero child count; files carry none.
        let item_count: Option<i32> = data.kind.is_folder().then_some(0);

        sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, kind, size, object_key, access_url, parent_id, \
             item_count, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.kind)
        .bind(data.size)
        .bind(&data.object_key)
        .bind(&data.access_url)
        .bind(data.parent_id)
        .bind(item_count)
        .bind(&data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert item", e))
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> AppResult<Option<Item>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE items SET modified_at = NOW()");

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name.clone());
        }
        if let Some(parent_id) = &patch.parent_id {
            qb.push(", parent_id = ").push_bind(*parent_id);
        }
        if let Some(item_count) = patch.item_count {
            qb.push(", item_count = ").push_bind(item_count);
        }
        if let Some(size) = patch.size {
            qb.push(", size = ").push_bind(size);
        }
        if let Some(object_key) = &patch.object_key {
            qb.push(", object_key = ").push_bind(object_key.clone());
        }
        if let Some(access_url) = &patch.access_url {
            qb.push(", access_url = ").push_bind(access_url.clone());
        }
        if let Some(share_id) = &patch.share_id {
            qb.push(", share_id = ").push_bind(share_id.clone());
        }
        if let Some(is_public) = patch.is_public {
            qb.push(", is_public = ").push_bind(is_public);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Item>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))
    }

    async fn delete(&self, id: ItemId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_name(&self, fragment: &str, owner: &OwnerId) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", escape_like(fragment));
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 AND name ILIKE $2 \
             ORDER BY name ASC, id ASC",
        )
        .bind(owner)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search items", e))
    }

    async fn count_children(&self, folder_id: ItemId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE parent_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))
    }

    async fn recount_item_count(&self, folder_id: ItemId) -> AppResult<()> {
        // Full recount rather than increment/decrement: self-correcting
        // under any interleaving of concurrent mutations.
        sqlx::query(
            "UPDATE items SET item_count = \
                 (SELECT COUNT(*) FROM items c WHERE c.parent_id = items.id) \
             WHERE id = $1 AND kind = 'folder'",
        )
        .bind(folder_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to recount item count", e)
        })?;
        Ok(())
    }

    async fn find_by_share_token(&self, token: &str) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE share_id = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find item by share token", e)
            })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

//! Category repository
//!
//! Categories form a tree through `parent_id`; items are linked through
//! the `category_item` join table.

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};

use jpashop_core::Category;

use super::DbError;

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a category, optionally below an existing parent.
    pub async fn save(&self, name: &str, parent_id: Option<i64>) -> Result<Category, DbError> {
        let mut tx = self.pool.begin().await?;

        if let Some(parent) = parent_id {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM category WHERE category_id = ?)")
                    .bind(parent)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists.0 {
                return Err(DbError::not_found("category", parent));
            }
        }

        let result = sqlx::query("INSERT INTO category (name, parent_id) VALUES (?, ?)")
            .bind(name)
            .bind(parent_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Category::new(result.last_insert_rowid(), name, parent_id))
    }

    /// Link an item to a category. Linking twice is a no-op.
    pub async fn add_item(&self, category_id: i64, item_id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let (category_exists, item_exists): (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM category WHERE category_id = ?),
                EXISTS(SELECT 1 FROM item WHERE item_id = ?)
            "#,
        )
        .bind(category_id)
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await?;

        if !category_exists {
            return Err(DbError::not_found("category", category_id));
        }
        if !item_exists {
            return Err(DbError::not_found("item", item_id));
        }

        sqlx::query("INSERT OR IGNORE INTO category_item (category_id, item_id) VALUES (?, ?)")
            .bind(category_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Every category as a forest, with linked item ids.
    ///
    /// Two queries regardless of tree size: categories, then all links.
    pub async fn find_all(&self) -> Result<Vec<Category>, DbError> {
        let records = sqlx::query("SELECT category_id, name, parent_id FROM category ORDER BY category_id")
            .fetch_all(self.pool)
            .await?;

        let links = sqlx::query("SELECT category_id, item_id FROM category_item ORDER BY item_id")
            .fetch_all(self.pool)
            .await?;

        let mut items_by_category: HashMap<i64, Vec<i64>> = HashMap::new();
        for link in &links {
            items_by_category
                .entry(link.try_get("category_id")?)
                .or_default()
                .push(link.try_get("item_id")?);
        }

        let mut flat = Vec::with_capacity(records.len());
        for r in &records {
            let id: i64 = r.try_get("category_id")?;
            let mut category = Category::new(id, r.try_get::<String, _>("name")?, r.try_get("parent_id")?);
            category.item_ids = items_by_category.remove(&id).unwrap_or_default();
            flat.push(category);
        }

        Ok(Category::build_tree(flat))
    }
}

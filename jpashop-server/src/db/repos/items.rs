//! Item repository
//!
//! Books, albums and movies share the `item` table (`dtype` column).

use sqlx::{Executor, Sqlite, SqlitePool};

use jpashop_core::domain::ItemDraft;
use jpashop_core::Item;

use super::{rows, DbError};

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an item of any kind.
    pub async fn save(&self, draft: &ItemDraft) -> Result<Item, DbError> {
        let columns = draft.kind.to_columns();
        let result = sqlx::query(
            r#"
            INSERT INTO item (dtype, name, price, stock_quantity, author, isbn, artist, etc, director, actor)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(draft.kind.discriminator())
        .bind(&draft.name)
        .bind(draft.price.get())
        .bind(draft.stock_quantity)
        .bind(&columns.author)
        .bind(&columns.isbn)
        .bind(&columns.artist)
        .bind(&columns.etc)
        .bind(&columns.director)
        .bind(&columns.actor)
        .execute(self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: draft.name.clone(),
            price: draft.price.get(),
            stock_quantity: draft.stock_quantity,
            kind: draft.kind.clone(),
        })
    }

    /// Get a single item by id.
    pub async fn find_one(&self, id: i64) -> Result<Item, DbError> {
        let row = sqlx::query(concat!(
            "SELECT ",
            item_columns!(),
            " FROM item i WHERE i.item_id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("item", id))?;

        Ok(rows::item(&row)?)
    }

    /// All items in id order.
    pub async fn find_all(&self) -> Result<Vec<Item>, DbError> {
        let records = sqlx::query(concat!(
            "SELECT ",
            item_columns!(),
            " FROM item i ORDER BY i.item_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(records.iter().map(rows::item).collect::<Result<_, _>>()?)
    }

    /// Overwrite every column of an existing item.
    pub async fn update(&self, id: i64, draft: &ItemDraft) -> Result<Item, DbError> {
        let columns = draft.kind.to_columns();
        let result = sqlx::query(
            r#"
            UPDATE item
            SET dtype = ?, name = ?, price = ?, stock_quantity = ?,
                author = ?, isbn = ?, artist = ?, etc = ?, director = ?, actor = ?
            WHERE item_id = ?
            "#,
        )
        .bind(draft.kind.discriminator())
        .bind(&draft.name)
        .bind(draft.price.get())
        .bind(draft.stock_quantity)
        .bind(&columns.author)
        .bind(&columns.isbn)
        .bind(&columns.artist)
        .bind(&columns.etc)
        .bind(&columns.director)
        .bind(&columns.actor)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("item", id));
        }

        Ok(Item {
            id,
            name: draft.name.clone(),
            price: draft.price.get(),
            stock_quantity: draft.stock_quantity,
            kind: draft.kind.clone(),
        })
    }

    /// Shift an item's stock by `delta` on any executor, usually an open
    /// transaction.
    ///
    /// The delta only applies while the result stays within `0..=i32::MAX`;
    /// the returned row count is 0 when the guard (or a missing item)
    /// blocked the write.
    pub async fn update_stock<'e, E>(executor: E, item_id: i64, delta: i32) -> Result<u64, DbError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE item SET stock_quantity = stock_quantity + ?
            WHERE item_id = ? AND stock_quantity + ? BETWEEN 0 AND ?
            "#,
        )
        .bind(delta)
        .bind(item_id)
        .bind(delta)
        .bind(i32::MAX)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, test_pool};
    use jpashop_core::{ItemKind, Price};

    #[tokio::test]
    async fn save_and_find_each_kind() {
        let (_dir, pool) = test_pool().await;
        let repo = ItemRepo::new(&pool);

        let kinds = [
            ItemKind::Book {
                author: Some("kim".into()),
                isbn: Some("978".into()),
            },
            ItemKind::Album {
                artist: Some("iu".into()),
                etc: None,
            },
            ItemKind::Movie {
                director: Some("bong".into()),
                actor: Some("song".into()),
            },
        ];

        for kind in kinds {
            let draft = ItemDraft::new("thing", Price::new(1000).unwrap(), 3, kind).unwrap();
            let saved = repo.save(&draft).await.unwrap();
            assert_eq!(repo.find_one(saved.id).await.unwrap(), saved);
        }

        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (_dir, pool) = test_pool().await;
        let saved = book(&pool, "JPA", 10000, 10).await;

        let draft = ItemDraft::new(
            "JPA 2nd",
            Price::new(12000).unwrap(),
            4,
            ItemKind::Book {
                author: Some("kim".into()),
                isbn: None,
            },
        )
        .unwrap();
        let repo = ItemRepo::new(&pool);
        repo.update(saved.id, &draft).await.unwrap();

        let found = repo.find_one(saved.id).await.unwrap();
        assert_eq!(found.name, "JPA 2nd");
        assert_eq!(found.price, 12000);
        assert_eq!(found.stock_quantity, 4);
    }

    #[tokio::test]
    async fn stock_update_never_goes_negative() {
        let (_dir, pool) = test_pool().await;
        let saved = book(&pool, "JPA", 10000, 3).await;

        assert_eq!(ItemRepo::update_stock(&pool, saved.id, -2).await.unwrap(), 1);
        assert_eq!(ItemRepo::update_stock(&pool, saved.id, -2).await.unwrap(), 0);
        assert_eq!(ItemRepo::update_stock(&pool, saved.id, 5).await.unwrap(), 1);

        let found = ItemRepo::new(&pool).find_one(saved.id).await.unwrap();
        assert_eq!(found.stock_quantity, 6);
    }

    #[tokio::test]
    async fn stock_update_never_exceeds_column_range() {
        let (_dir, pool) = test_pool().await;
        let saved = book(&pool, "JPA", 10000, i32::MAX).await;

        assert_eq!(ItemRepo::update_stock(&pool, saved.id, 1).await.unwrap(), 0);

        let found = ItemRepo::new(&pool).find_one(saved.id).await.unwrap();
        assert_eq!(found.stock_quantity, i32::MAX);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let (_dir, pool) = test_pool().await;
        let draft = ItemDraft::new(
            "x",
            Price::new(1).unwrap(),
            1,
            ItemKind::Album {
                artist: None,
                etc: None,
            },
        )
        .unwrap();
        let err = ItemRepo::new(&pool).update(7, &draft).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "item", .. }));
    }
}

use sqlx::SqlitePool;

use jpashop_core::domain::ItemDraft;
use jpashop_core::{Item, ValidationError};

use super::ServiceResult;
use crate::db::ItemRepo;

/// Item catalogue
pub struct ItemService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save_item(&self, draft: ItemDraft) -> ServiceResult<Item> {
        let item = ItemRepo::new(self.pool).save(&draft).await?;
        tracing::info!(item_id = item.id, dtype = item.kind.discriminator(), "item saved");
        Ok(item)
    }

    /// Overwrite an item's fields. The kind of an item is fixed once saved.
    pub async fn update_item(&self, id: i64, draft: ItemDraft) -> ServiceResult<Item> {
        let repo = ItemRepo::new(self.pool);
        let current = repo.find_one(id).await?;

        if current.kind.discriminator() != draft.kind.discriminator() {
            return Err(ValidationError::InvalidVariant {
                field: "dtype",
                value: draft.kind.discriminator().to_owned(),
            }
            .into());
        }

        Ok(repo.update(id, &draft).await?)
    }

    pub async fn find_items(&self) -> ServiceResult<Vec<Item>> {
        Ok(ItemRepo::new(self.pool).find_all().await?)
    }

    pub async fn find_one(&self, id: i64) -> ServiceResult<Item> {
        Ok(ItemRepo::new(self.pool).find_one(id).await?)
    }
}

use sqlx::SqlitePool;

use jpashop_core::validation::required_text;
use jpashop_core::Category;

use super::ServiceResult;
use crate::db::CategoryRepo;

/// Category tree maintenance
pub struct CategoryService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a category, optionally under an existing parent.
    pub async fn create(&self, name: &str, parent_id: Option<i64>) -> ServiceResult<Category> {
        let name = required_text("name", name)?;
        Ok(CategoryRepo::new(self.pool).save(&name, parent_id).await?)
    }

    /// Link an item to a category. Linking twice is a no-op.
    pub async fn add_item(&self, category_id: i64, item_id: i64) -> ServiceResult<()> {
        Ok(CategoryRepo::new(self.pool).add_item(category_id, item_id).await?)
    }

    pub async fn find_tree(&self) -> ServiceResult<Vec<Category>> {
        Ok(CategoryRepo::new(self.pool).find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;
    use crate::test_support::test_pool;
    use jpashop_core::ShopError;

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (_dir, pool) = test_pool().await;
        let err = CategoryService::new(&pool).create("  ", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(ShopError::Validation(_))));
    }

    #[tokio::test]
    async fn nested_categories() {
        let (_dir, pool) = test_pool().await;
        let service = CategoryService::new(&pool);

        let root = service.create("books", None).await.unwrap();
        service.create("it", Some(root.id)).await.unwrap();
        service.create("novel", Some(root.id)).await.unwrap();

        let tree = service.find_tree().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 2);
    }
}

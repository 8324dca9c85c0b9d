//! Helpers shared by unit tests

use sqlx::SqlitePool;
use tempfile::TempDir;

use jpashop_core::{Address, Count, Item, ItemKind, Member, MemberName, Price};

use crate::db::{create_pool, migrations, ItemRepo, MemberRepo};
use jpashop_core::domain::ItemDraft;

/// Fresh migrated database in a temp dir. Keep the dir alive for the test.
pub(crate) async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("shop.db").display());
    let pool = create_pool(&url).await.expect("pool");
    migrations::run(&pool).await.expect("migrations");
    (dir, pool)
}

pub(crate) async fn member(pool: &SqlitePool, name: &str) -> Member {
    MemberRepo::new(pool)
        .save(
            &MemberName::new(name).unwrap(),
            Some(&Address::new("Seoul", "river", "123-123")),
        )
        .await
        .expect("member")
}

pub(crate) async fn book(pool: &SqlitePool, name: &str, price: i32, stock: i32) -> Item {
    let draft = ItemDraft::new(
        name,
        Price::new(price).unwrap(),
        stock,
        ItemKind::Book {
            author: None,
            isbn: None,
        },
    )
    .unwrap();
    ItemRepo::new(pool).save(&draft).await.expect("book")
}

pub(crate) fn count(n: i32) -> Count {
    Count::new(n).unwrap()
}

//! Sample data: two members with one two-line order each

use sqlx::SqlitePool;

use jpashop_core::domain::ItemDraft;
use jpashop_core::{
    Address, Count, Delivery, Item, ItemKind, Member, MemberName, Order, OrderItem, OrderSearch,
    Price,
};

use crate::db::{ItemRepo, MemberRepo, OrderRepo};
use crate::service::{ItemService, MemberService, ServiceResult};

struct SampleBook {
    name: &'static str,
    price: i32,
    stock: i32,
    count: i32,
}

struct Sample {
    member: &'static str,
    city: &'static str,
    street: &'static str,
    zipcode: &'static str,
    books: [SampleBook; 2],
}

const SAMPLES: [Sample; 2] = [
    Sample {
        member: "userA",
        city: "Seoul",
        street: "1",
        zipcode: "1111",
        books: [
            SampleBook { name: "JPA1 BOOK", price: 10000, stock: 100, count: 1 },
            SampleBook { name: "JPA2 BOOK", price: 20000, stock: 100, count: 2 },
        ],
    },
    Sample {
        member: "userB",
        city: "Jinju",
        street: "2",
        zipcode: "2222",
        books: [
            SampleBook { name: "SPRING1 BOOK", price: 20000, stock: 200, count: 3 },
            SampleBook { name: "SPRING2 BOOK", price: 40000, stock: 300, count: 4 },
        ],
    },
];

/// Insert the sample members, books and orders.
///
/// Each sample member is completed on its own: parts already stored are
/// reused, so a run that stopped halfway is finished by the next one.
/// Returns false when every sample was already complete.
pub async fn seed(pool: &SqlitePool) -> ServiceResult<bool> {
    let mut inserted = false;
    for sample in &SAMPLES {
        inserted |= seed_sample(pool, sample).await?;
    }

    if inserted {
        tracing::info!("sample data inserted");
    } else {
        tracing::info!("sample data already present, skipping seed");
    }
    Ok(inserted)
}

async fn seed_sample(pool: &SqlitePool, sample: &Sample) -> ServiceResult<bool> {
    let existing = MemberRepo::new(pool).find_by_name(sample.member).await?;
    let (member, inserted) = match existing.into_iter().next() {
        Some(member) => (member, false),
        None => {
            let address = Address::new(sample.city, sample.street, sample.zipcode);
            (member(pool, sample.member, address).await?, true)
        }
    };

    let orders = OrderRepo::new(pool)
        .find_all_by_search(&OrderSearch::default())
        .await?;
    if orders.iter().any(|o| o.member_id == member.id) {
        return Ok(inserted);
    }

    let stored = ItemRepo::new(pool).find_all().await?;
    let mut lines = Vec::with_capacity(sample.books.len());
    for spec in &sample.books {
        let item = match stored.iter().find(|i| i.name == spec.name) {
            Some(item) => item.clone(),
            None => book(pool, spec.name, spec.price, spec.stock).await?,
        };
        lines.push((item, spec.count));
    }

    place(pool, member, lines).await?;
    Ok(true)
}

async fn member(pool: &SqlitePool, name: &str, address: Address) -> ServiceResult<Member> {
    let service = MemberService::new(pool);
    let id = service.join(MemberName::new(name)?, Some(address)).await?;
    service.find_one(id).await
}

async fn book(pool: &SqlitePool, name: &str, price: i32, stock: i32) -> ServiceResult<Item> {
    let kind = ItemKind::Book {
        author: None,
        isbn: None,
    };
    let draft = ItemDraft::new(name, Price::new(price)?, stock, kind)?;
    ItemService::new(pool).save_item(draft).await
}

async fn place(pool: &SqlitePool, member: Member, lines: Vec<(Item, i32)>) -> ServiceResult<i64> {
    let mut order_items = Vec::with_capacity(lines.len());
    for (item, count) in lines {
        let price = Price::new(item.price)?;
        order_items.push(OrderItem::create(item, price, Count::new(count)?)?);
    }

    let delivery = Delivery::new(member.address.clone());
    let mut order = Order::create(member, delivery, order_items);
    Ok(OrderRepo::new(pool).insert_order(&mut order).await?)
}

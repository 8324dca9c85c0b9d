//! Order repository
//!
//! One method per fetch strategy used by the listing endpoints:
//! - single-row loaders (`find_member`, `find_delivery`, ...) for the
//!   1 + N variants
//! - ToOne join (`find_all_with_member_delivery`), pageable
//! - full collection join (`find_all_with_item`), de-duplicated here
//! - batch `IN` fetch of order lines (`find_order_items_in`)
//! - direct projection (`find_order_dtos`)

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use jpashop_core::{Delivery, DeliveryStatus, Item, Member, Order, OrderItem, OrderSearch, OrderStatus};

use super::order_query::OrderSimpleQueryDto;
use super::{rows, DbError, ItemRepo, MemberRepo};
use crate::models::OffsetLimit;

/// Order row with foreign keys only
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: i64,
    pub member_id: i64,
    pub delivery_id: i64,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Order line row with foreign keys only
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub order_price: i32,
    pub count: i32,
}

/// Order repository
pub struct OrderRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a freshly created order: delivery, order, lines and stock.
    ///
    /// Stock is decremented with a guarded UPDATE so a concurrent order that
    /// drained the item first makes this one fail with `Conflict` instead of
    /// driving stock negative. Ids are written back into `order`.
    pub async fn insert_order(&self, order: &mut Order) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let address = order.delivery.address.as_ref();
        let delivery_id = sqlx::query(
            "INSERT INTO delivery (city, street, zipcode, status) VALUES (?, ?, ?, ?)",
        )
        .bind(address.map(|a| a.city.as_str()))
        .bind(address.map(|a| a.street.as_str()))
        .bind(address.map(|a| a.zipcode.as_str()))
        .bind(order.delivery.status.as_str())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let order_id = sqlx::query(
            "INSERT INTO orders (member_id, delivery_id, order_date, status) VALUES (?, ?, ?, ?)",
        )
        .bind(order.member.id)
        .bind(delivery_id)
        .bind(order.order_date)
        .bind(order.status.as_str())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for line in &mut order.order_items {
            let updated = ItemRepo::update_stock(&mut *tx, line.item.id, -line.count).await?;

            if updated == 0 {
                return Err(DbError::Conflict {
                    resource: "item",
                    id: line.item.id.to_string(),
                    reason: "stock changed while ordering",
                });
            }

            line.id = sqlx::query(
                "INSERT INTO order_item (order_id, item_id, order_price, count) VALUES (?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(line.item.id)
            .bind(line.order_price)
            .bind(line.count)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        }

        tx.commit().await?;

        order.id = order_id;
        order.delivery.id = delivery_id;
        tracing::debug!(order_id, lines = order.order_items.len(), "order inserted");
        Ok(order_id)
    }

    /// Load a complete order aggregate: member, delivery, lines and items.
    pub async fn find_one(&self, id: i64) -> Result<Order, DbError> {
        let row = sqlx::query(concat!(order_header_select!(), " WHERE o.order_id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("order", id))?;

        let mut order = rows::order_header(&row)?;

        let lines = sqlx::query(concat!(
            "SELECT oi.order_item_id, oi.order_price, oi.count, ",
            item_columns!(),
            " FROM order_item oi JOIN item i ON i.item_id = oi.item_id",
            " WHERE oi.order_id = ? ORDER BY oi.order_item_id"
        ))
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        order.order_items = lines.iter().map(rows::order_item).collect::<Result<_, _>>()?;
        Ok(order)
    }

    /// Search orders by member name substring and status.
    ///
    /// Returns bare rows; associations are left to the caller. At most
    /// `OrderSearch::MAX_RESULTS` rows.
    pub async fn find_all_by_search(&self, search: &OrderSearch) -> Result<Vec<OrderRow>, DbError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT o.order_id, o.member_id, o.delivery_id, o.order_date, o.status AS order_status
            FROM orders o
            JOIN member m ON m.member_id = o.member_id
            "#,
        );

        let mut has_where = false;
        if let Some(status) = search.order_status {
            builder.push(" WHERE o.status = ").push_bind(status.as_str());
            has_where = true;
        }
        if let Some(pattern) = search.member_name_pattern() {
            builder
                .push(if has_where { " AND " } else { " WHERE " })
                .push("m.name LIKE ")
                .push_bind(pattern);
        }
        builder
            .push(" ORDER BY o.order_id LIMIT ")
            .push_bind(OrderSearch::MAX_RESULTS);

        let records = builder.build().fetch_all(self.pool).await?;
        records
            .iter()
            .map(|r| -> Result<OrderRow, DbError> {
                Ok(OrderRow {
                    id: r.try_get("order_id")?,
                    member_id: r.try_get("member_id")?,
                    delivery_id: r.try_get("delivery_id")?,
                    order_date: r.try_get("order_date")?,
                    status: rows::order_status(r)?,
                })
            })
            .collect()
    }

    /// Load one member (one query per call).
    pub async fn find_member(&self, member_id: i64) -> Result<Member, DbError> {
        MemberRepo::new(self.pool).find_one(member_id).await
    }

    /// Load one delivery (one query per call).
    pub async fn find_delivery(&self, delivery_id: i64) -> Result<Delivery, DbError> {
        let row = sqlx::query(concat!(
            "SELECT ",
            delivery_columns!(),
            " FROM delivery d WHERE d.delivery_id = ?"
        ))
        .bind(delivery_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("delivery", delivery_id))?;

        Ok(rows::delivery(&row)?)
    }

    /// Lines of one order, without their items (one query per call).
    pub async fn find_order_items(&self, order_id: i64) -> Result<Vec<OrderItemRow>, DbError> {
        let records = sqlx::query(
            r#"
            SELECT order_item_id, order_id, item_id, order_price, count
            FROM order_item
            WHERE order_id = ?
            ORDER BY order_item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        records
            .iter()
            .map(|r| -> Result<OrderItemRow, DbError> {
                Ok(OrderItemRow {
                    id: r.try_get("order_item_id")?,
                    order_id: r.try_get("order_id")?,
                    item_id: r.try_get("item_id")?,
                    order_price: r.try_get("order_price")?,
                    count: r.try_get("count")?,
                })
            })
            .collect()
    }

    /// Load one item (one query per call).
    pub async fn find_item(&self, item_id: i64) -> Result<Item, DbError> {
        ItemRepo::new(self.pool).find_one(item_id).await
    }

    /// Orders with member and delivery joined in one query.
    ///
    /// ToOne joins do not multiply rows, so the window applies to orders.
    /// The returned orders have no lines loaded.
    pub async fn find_all_with_member_delivery(
        &self,
        page: Option<OffsetLimit>,
    ) -> Result<Vec<Order>, DbError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(concat!(order_header_select!(), " ORDER BY o.order_id"));

        if let Some(page) = page {
            builder
                .push(" LIMIT ")
                .push_bind(i64::from(page.limit))
                .push(" OFFSET ")
                .push_bind(i64::from(page.offset));
        }

        let records = builder.build().fetch_all(self.pool).await?;
        Ok(records.iter().map(rows::order_header).collect::<Result<_, _>>()?)
    }

    /// Orders with every association in a single join.
    ///
    /// The join yields one row per order line; consecutive rows of the same
    /// order are folded back into one aggregate. Orders without lines drop
    /// out of the inner join, and the result cannot be paged by order.
    pub async fn find_all_with_item(&self) -> Result<Vec<Order>, DbError> {
        let records = sqlx::query(concat!(
            "SELECT o.order_id, o.order_date, o.status AS order_status, ",
            member_columns!(),
            ", ",
            delivery_columns!(),
            ", oi.order_item_id, oi.order_price, oi.count, ",
            item_columns!(),
            " FROM orders o",
            " JOIN member m ON m.member_id = o.member_id",
            " JOIN delivery d ON d.delivery_id = o.delivery_id",
            " JOIN order_item oi ON oi.order_id = o.order_id",
            " JOIN item i ON i.item_id = oi.item_id",
            " ORDER BY o.order_id, oi.order_item_id"
        ))
        .fetch_all(self.pool)
        .await?;

        let mut orders: Vec<Order> = Vec::new();
        for r in &records {
            let order_id: i64 = r.try_get("order_id")?;
            let line = rows::order_item(r)?;
            match orders.last_mut() {
                Some(order) if order.id == order_id => order.order_items.push(line),
                _ => {
                    let mut order = rows::order_header(r)?;
                    order.order_items.push(line);
                    orders.push(order);
                }
            }
        }

        tracing::debug!(rows = records.len(), orders = orders.len(), "collection join folded");
        Ok(orders)
    }

    /// Lines (with items) for many orders, `batch_size` order ids per query.
    pub async fn find_order_items_in(
        &self,
        order_ids: &[i64],
        batch_size: usize,
    ) -> Result<HashMap<i64, Vec<OrderItem>>, DbError> {
        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        let mut batches = 0usize;

        for chunk in order_ids.chunks(batch_size.max(1)) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(concat!(
                "SELECT oi.order_item_id, oi.order_id, oi.order_price, oi.count, ",
                item_columns!(),
                " FROM order_item oi JOIN item i ON i.item_id = oi.item_id",
                " WHERE oi.order_id IN ("
            ));
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(") ORDER BY oi.order_item_id");

            let records = builder.build().fetch_all(self.pool).await?;
            for r in &records {
                let order_id: i64 = r.try_get("order_id")?;
                grouped.entry(order_id).or_default().push(rows::order_item(r)?);
            }
            batches += 1;
        }

        tracing::debug!(orders = order_ids.len(), batches, "batch-fetched order lines");
        Ok(grouped)
    }

    /// Orders projected straight into the simple DTO (ToOne join, only the
    /// selected columns).
    pub async fn find_order_dtos(&self) -> Result<Vec<OrderSimpleQueryDto>, DbError> {
        let records = sqlx::query(
            r#"
            SELECT o.order_id, m.name AS member_name, o.order_date, o.status AS order_status,
                   d.city AS delivery_city, d.street AS delivery_street, d.zipcode AS delivery_zipcode
            FROM orders o
            JOIN member m ON m.member_id = o.member_id
            JOIN delivery d ON d.delivery_id = o.delivery_id
            ORDER BY o.order_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        records
            .iter()
            .map(|r| -> Result<OrderSimpleQueryDto, DbError> {
                Ok(OrderSimpleQueryDto {
                    order_id: r.try_get("order_id")?,
                    name: r.try_get("member_name")?,
                    order_date: r.try_get("order_date")?,
                    order_status: rows::order_status(r)?,
                    address: rows::address(r, "delivery")?,
                })
            })
            .collect()
    }

    /// Persist a cancellation: status plus restored stock for every line.
    ///
    /// The status change is guarded on the stored state, so a concurrent
    /// cancel or delivery makes this fail with `Conflict`.
    pub async fn update_status(&self, order: &Order) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE orders SET status = ?
            WHERE order_id = ? AND status = ?
              AND EXISTS (
                  SELECT 1 FROM delivery d
                  WHERE d.delivery_id = orders.delivery_id AND d.status = ?
              )
            "#,
        )
        .bind(order.status.as_str())
        .bind(order.id)
        .bind(OrderStatus::Order.as_str())
        .bind(DeliveryStatus::Ready.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DbError::Conflict {
                resource: "order",
                id: order.id.to_string(),
                reason: "order changed while cancelling",
            });
        }

        for line in &order.order_items {
            let restored = ItemRepo::update_stock(&mut *tx, line.item.id, line.count).await?;

            if restored == 0 {
                return Err(DbError::Conflict {
                    resource: "item",
                    id: line.item.id.to_string(),
                    reason: "stock cannot take back the cancelled quantity",
                });
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Store a delivery's status.
    ///
    /// Only deliveries of active orders change, so a cancel that commits
    /// first makes this fail with `Conflict`.
    pub async fn update_delivery_status(
        &self,
        delivery_id: i64,
        status: DeliveryStatus,
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE delivery SET status = ?
            WHERE delivery_id = ?
              AND EXISTS (
                  SELECT 1 FROM orders o
                  WHERE o.delivery_id = delivery.delivery_id AND o.status = ?
              )
            "#,
        )
        .bind(status.as_str())
        .bind(delivery_id)
        .bind(OrderStatus::Order.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists = sqlx::query("SELECT 1 FROM delivery WHERE delivery_id = ?")
            .bind(delivery_id)
            .fetch_optional(self.pool)
            .await?
            .is_some();
        if exists {
            Err(DbError::Conflict {
                resource: "delivery",
                id: delivery_id.to_string(),
                reason: "order is no longer active",
            })
        } else {
            Err(DbError::not_found("delivery", delivery_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, count, member, test_pool};
    use jpashop_core::Price;

    async fn place(pool: &SqlitePool, member: &Member, items: &[(&Item, i32)]) -> Order {
        let lines = items
            .iter()
            .map(|(item, n)| {
                OrderItem::create((*item).clone(), Price::new(item.price).unwrap(), count(*n))
                    .unwrap()
            })
            .collect();
        let delivery = Delivery::new(member.address.clone());
        let mut order = Order::create(member.clone(), delivery, lines);
        OrderRepo::new(pool).insert_order(&mut order).await.unwrap();
        order
    }

    #[tokio::test]
    async fn insert_and_load_aggregate() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 10).await;

        let placed = place(&pool, &kim, &[(&jpa, 3)]).await;
        let loaded = OrderRepo::new(&pool).find_one(placed.id).await.unwrap();

        assert_eq!(loaded.member, kim);
        assert_eq!(loaded.status, OrderStatus::Order);
        assert_eq!(loaded.delivery.status, DeliveryStatus::Ready);
        assert_eq!(loaded.order_items.len(), 1);
        assert_eq!(loaded.total_price(), 30000);
        assert_eq!(loaded.order_items[0].item.stock_quantity, 7);
    }

    #[tokio::test]
    async fn guarded_stock_update_rejects_stale_snapshot() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 5).await;

        // First order drains the stock behind the second snapshot's back.
        let stale = jpa.clone();
        place(&pool, &kim, &[(&jpa, 5)]).await;

        let line = OrderItem::create(stale, Price::new(10000).unwrap(), count(1)).unwrap();
        let mut order = Order::create(kim.clone(), Delivery::new(None), vec![line]);
        let err = OrderRepo::new(&pool).insert_order(&mut order).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "item", .. }));

        // The failed transaction left nothing behind.
        let orders = OrderRepo::new(&pool)
            .find_all_by_search(&OrderSearch::default())
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn search_filters_by_name_and_status() {
        let (_dir, pool) = test_pool().await;
        let user_a = member(&pool, "userA").await;
        let user_b = member(&pool, "userB").await;
        let jpa = book(&pool, "JPA", 10000, 100).await;

        let first = place(&pool, &user_a, &[(&jpa, 1)]).await;
        place(&pool, &user_b, &[(&jpa, 1)]).await;

        let repo = OrderRepo::new(&pool);
        let mut cancelled = repo.find_one(first.id).await.unwrap();
        cancelled.cancel().unwrap();
        repo.update_status(&cancelled).await.unwrap();

        let all = repo.find_all_by_search(&OrderSearch::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let by_name = repo
            .find_all_by_search(&OrderSearch {
                member_name: Some("B".into()),
                order_status: None,
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].member_id, user_b.id);

        let by_status = repo
            .find_all_by_search(&OrderSearch {
                member_name: Some("user".into()),
                order_status: Some(OrderStatus::Cancel),
            })
            .await
            .unwrap();
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].id, first.id);
    }

    #[tokio::test]
    async fn search_is_capped_at_max_results() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let total = OrderSearch::MAX_RESULTS + 1;

        sqlx::query(
            r#"
            WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < ?)
            INSERT INTO delivery (status) SELECT 'READY' FROM n
            "#,
        )
        .bind(total)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO orders (member_id, delivery_id, order_date, status)
            SELECT ?, delivery_id, ?, 'ORDER' FROM delivery
            "#,
        )
        .bind(kim.id)
        .bind(Utc::now())
        .execute(&pool)
        .await
        .unwrap();

        let found = OrderRepo::new(&pool)
            .find_all_by_search(&OrderSearch::default())
            .await
            .unwrap();
        assert_eq!(found.len() as i64, OrderSearch::MAX_RESULTS);
        assert_eq!(found[0].id, 1);
        assert_eq!(found.last().unwrap().id, OrderSearch::MAX_RESULTS);
    }

    #[tokio::test]
    async fn cancel_rejected_when_stock_cannot_take_it_back() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 10).await;
        let placed = place(&pool, &kim, &[(&jpa, 2)]).await;

        sqlx::query("UPDATE item SET stock_quantity = ? WHERE item_id = ?")
            .bind(i32::MAX - 1)
            .bind(jpa.id)
            .execute(&pool)
            .await
            .unwrap();

        // Snapshot taken before the stock jumped, so the domain check passes.
        let mut order = placed.clone();
        order.cancel().unwrap();

        let repo = OrderRepo::new(&pool);
        let err = repo.update_status(&order).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "item", .. }));

        let stored = repo.find_one(placed.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Order);
        assert_eq!(stored.order_items[0].item.stock_quantity, i32::MAX - 1);
    }

    #[tokio::test]
    async fn delivery_of_cancelled_order_is_not_completed() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 10).await;
        let placed = place(&pool, &kim, &[(&jpa, 1)]).await;

        let repo = OrderRepo::new(&pool);
        let mut cancelled = placed.clone();
        cancelled.cancel().unwrap();
        repo.update_status(&cancelled).await.unwrap();

        let err = repo
            .update_delivery_status(placed.delivery.id, DeliveryStatus::Comp)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "delivery", .. }));
        let delivery = repo.find_delivery(placed.delivery.id).await.unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Ready);

        let err = repo
            .update_delivery_status(999, DeliveryStatus::Comp)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "delivery", .. }));
    }

    #[tokio::test]
    async fn collection_join_is_deduplicated() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa1 = book(&pool, "JPA1", 10000, 100).await;
        let jpa2 = book(&pool, "JPA2", 20000, 100).await;

        place(&pool, &kim, &[(&jpa1, 1), (&jpa2, 2)]).await;
        place(&pool, &kim, &[(&jpa1, 3)]).await;

        let orders = OrderRepo::new(&pool).find_all_with_item().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_items.len(), 2);
        assert_eq!(orders[1].order_items.len(), 1);
    }

    #[tokio::test]
    async fn paging_applies_to_orders() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 100, 100).await;

        for _ in 0..5 {
            place(&pool, &kim, &[(&jpa, 1)]).await;
        }

        let repo = OrderRepo::new(&pool);
        let page = repo
            .find_all_with_member_delivery(Some(OffsetLimit::new(1, 2)))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 2);
        assert!(page.iter().all(|o| o.order_items.is_empty()));

        let all = repo.find_all_with_member_delivery(None).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn batch_fetch_groups_lines_across_chunks() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa1 = book(&pool, "JPA1", 100, 100).await;
        let jpa2 = book(&pool, "JPA2", 200, 100).await;

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(place(&pool, &kim, &[(&jpa1, 1), (&jpa2, 1)]).await.id);
        }

        let grouped = OrderRepo::new(&pool)
            .find_order_items_in(&ids, 2)
            .await
            .unwrap();
        assert_eq!(grouped.len(), 3);
        assert!(grouped.values().all(|lines| lines.len() == 2));
        assert_eq!(grouped[&ids[0]][1].item.name, "JPA2");
    }

    #[tokio::test]
    async fn cancellation_restores_stock_once() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 10).await;
        let placed = place(&pool, &kim, &[(&jpa, 4)]).await;

        let repo = OrderRepo::new(&pool);
        let mut order = repo.find_one(placed.id).await.unwrap();
        order.cancel().unwrap();
        repo.update_status(&order).await.unwrap();

        assert_eq!(repo.find_item(jpa.id).await.unwrap().stock_quantity, 10);

        // Replaying the same cancellation hits the status guard.
        let err = repo.update_status(&order).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "order", .. }));
        assert_eq!(repo.find_item(jpa.id).await.unwrap().stock_quantity, 10);
    }

    #[tokio::test]
    async fn simple_projection() {
        let (_dir, pool) = test_pool().await;
        let kim = member(&pool, "kim").await;
        let jpa = book(&pool, "JPA", 10000, 10).await;
        place(&pool, &kim, &[(&jpa, 1)]).await;

        let dtos = OrderRepo::new(&pool).find_order_dtos().await.unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].name, "kim");
        assert_eq!(dtos[0].address, kim.address);
    }
}

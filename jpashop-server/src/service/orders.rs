use sqlx::SqlitePool;

use jpashop_core::{Count, Delivery, DeliveryStatus, Order, OrderItem, OrderSearch, Price};

use super::ServiceResult;
use crate::db::OrderRepo;

/// Placing, cancelling and shipping orders
pub struct OrderService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Order `count` units of one item for a member, shipped to the
    /// member's address.
    ///
    /// Stock is checked before anything is written; a failed check leaves
    /// the database untouched.
    pub async fn order(&self, member_id: i64, item_id: i64, count: Count) -> ServiceResult<i64> {
        let repo = OrderRepo::new(self.pool);
        let member = repo.find_member(member_id).await?;
        let item = repo.find_item(item_id).await?;

        let order_price = Price::new(item.price)?;
        let order_item = OrderItem::create(item, order_price, count)?;
        let delivery = Delivery::new(member.address.clone());
        let mut order = Order::create(member, delivery, vec![order_item]);

        let order_id = repo.insert_order(&mut order).await?;
        tracing::info!(order_id, member_id, item_id, count = count.get(), "order placed");
        Ok(order_id)
    }

    /// Cancel an order and put its stock back.
    pub async fn cancel_order(&self, order_id: i64) -> ServiceResult<()> {
        let repo = OrderRepo::new(self.pool);
        let mut order = repo.find_one(order_id).await?;

        order.cancel()?;
        repo.update_status(&order).await?;

        tracing::info!(order_id, "order cancelled");
        Ok(())
    }

    /// Mark an order's delivery as completed.
    pub async fn complete_delivery(&self, order_id: i64) -> ServiceResult<()> {
        let repo = OrderRepo::new(self.pool);
        let mut order = repo.find_one(order_id).await?;

        order.complete_delivery()?;
        repo.update_delivery_status(order.delivery.id, DeliveryStatus::Comp)
            .await?;

        tracing::info!(order_id, delivery_id = order.delivery.id, "delivery completed");
        Ok(())
    }

    /// Orders matching the search, loaded as full aggregates.
    pub async fn find_orders(&self, search: &OrderSearch) -> ServiceResult<Vec<Order>> {
        let repo = OrderRepo::new(self.pool);
        let found = repo.find_all_by_search(search).await?;

        let mut orders = Vec::with_capacity(found.len());
        for row in found {
            orders.push(repo.find_one(row.id).await?);
        }
        Ok(orders)
    }
}

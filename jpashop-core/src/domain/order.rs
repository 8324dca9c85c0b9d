use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Delivery, Item, Member, UNSAVED_ID};
use crate::error::{Result, ShopError};
use crate::validation::{Count, Price, ValidationError};

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Order,
    Cancel,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ORDER" => Ok(Self::Order),
            "CANCEL" => Ok(Self::Cancel),
            other => Err(ValidationError::InvalidVariant {
                field: "order status",
                value: other.to_owned(),
            }),
        }
    }
}

/// One line of an order: an item, the price paid and the quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub item: Item,
    pub order_price: i32,
    pub count: i32,
}

impl OrderItem {
    /// Create an order line, taking `count` units out of the item's stock.
    pub fn create(mut item: Item, order_price: Price, count: Count) -> Result<Self> {
        item.remove_stock(count)?;

        Ok(Self {
            id: UNSAVED_ID,
            item,
            order_price: order_price.get(),
            count: count.get(),
        })
    }

    /// Give the ordered quantity back to the item.
    pub fn cancel(&mut self) -> Result<()> {
        self.item.add_stock(Count::new(self.count)?)
    }

    pub fn total_price(&self) -> i64 {
        i64::from(self.order_price) * i64::from(self.count)
    }
}

/// An order placed by a member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub member: Member,
    pub order_items: Vec<OrderItem>,
    pub delivery: Delivery,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Place a new order dated now.
    pub fn create(member: Member, delivery: Delivery, order_items: Vec<OrderItem>) -> Self {
        Self {
            id: UNSAVED_ID,
            member,
            order_items,
            delivery,
            order_date: Utc::now(),
            status: OrderStatus::Order,
        }
    }

    /// Cancel the order and return every line's stock.
    ///
    /// Delivered orders cannot be cancelled, and an order is cancelled at
    /// most once so stock is never restored twice.
    pub fn cancel(&mut self) -> Result<()> {
        if self.delivery.is_completed() {
            return Err(ShopError::AlreadyDelivered { order_id: self.id });
        }
        if self.status == OrderStatus::Cancel {
            return Err(ShopError::AlreadyCancelled { order_id: self.id });
        }

        // Lines are restored on a copy so a failing line leaves the order as it was.
        let mut order_items = self.order_items.clone();
        for order_item in &mut order_items {
            order_item.cancel()?;
        }
        self.order_items = order_items;
        self.status = OrderStatus::Cancel;
        Ok(())
    }

    /// Mark the delivery as completed. Cancelled orders are never shipped.
    pub fn complete_delivery(&mut self) -> Result<()> {
        if self.status == OrderStatus::Cancel {
            return Err(ShopError::AlreadyCancelled { order_id: self.id });
        }
        self.delivery.complete();
        Ok(())
    }

    /// Sum of all line totals
    pub fn total_price(&self) -> i64 {
        self.order_items.iter().map(OrderItem::total_price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, DeliveryStatus, ItemKind};

    fn member() -> Member {
        Member {
            id: 1,
            name: "member1".into(),
            address: Some(Address::new("Seoul", "river", "123-123")),
        }
    }

    fn book(stock: i32) -> Item {
        Item {
            id: 1,
            name: "country JPA".into(),
            price: 10000,
            stock_quantity: stock,
            kind: ItemKind::Book {
                author: None,
                isbn: None,
            },
        }
    }

    fn place(count: i32) -> Result<Order> {
        let member = member();
        let item = book(10);
        let price = Price::new(item.price)?;
        let line = OrderItem::create(item, price, Count::new(count)?)?;
        let delivery = Delivery::new(member.address.clone());
        Ok(Order::create(member, delivery, vec![line]))
    }

    #[test]
    fn order_decreases_stock() {
        let order = place(3).unwrap();
        assert_eq!(order.status, OrderStatus::Order);
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.total_price(), 10000 * 3);
        assert_eq!(order.order_items[0].item.stock_quantity, 7);
    }

    #[test]
    fn order_beyond_stock_fails() {
        let err = place(11).unwrap_err();
        assert!(matches!(err, ShopError::NotEnoughStock { .. }));
    }

    #[test]
    fn cancel_restores_stock() {
        let mut order = place(2).unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancel);
        assert_eq!(order.order_items[0].item.stock_quantity, 10);
    }

    #[test]
    fn cancel_after_delivery_is_rejected() {
        let mut order = place(2).unwrap();
        order.delivery.status = DeliveryStatus::Comp;

        let err = order.cancel().unwrap_err();
        assert!(matches!(err, ShopError::AlreadyDelivered { .. }));
        assert_eq!(order.status, OrderStatus::Order);
        assert_eq!(order.order_items[0].item.stock_quantity, 8);
    }

    #[test]
    fn cancel_twice_is_rejected() {
        let mut order = place(2).unwrap();
        order.cancel().unwrap();
        let err = order.cancel().unwrap_err();
        assert!(matches!(err, ShopError::AlreadyCancelled { .. }));
        assert_eq!(order.order_items[0].item.stock_quantity, 10);
    }

    #[test]
    fn cancel_that_would_overflow_stock_changes_nothing() {
        let mut order = place(2).unwrap();
        order.order_items[0].item.stock_quantity = i32::MAX;

        let err = order.cancel().unwrap_err();
        assert!(matches!(err, ShopError::StockOverflow { added: 2, .. }));
        assert_eq!(order.status, OrderStatus::Order);
        assert_eq!(order.order_items[0].item.stock_quantity, i32::MAX);
    }

    #[test]
    fn cancelled_order_is_not_delivered() {
        let mut order = place(1).unwrap();
        order.cancel().unwrap();
        assert!(order.complete_delivery().is_err());
        assert!(!order.delivery.is_completed());
    }

    #[test]
    fn total_price_does_not_overflow_i32() {
        let item = Item {
            price: i32::MAX,
            ..book(10)
        };
        let line = OrderItem::create(item, Price::new(i32::MAX).unwrap(), Count::new(2).unwrap())
            .unwrap();
        assert_eq!(line.total_price(), i64::from(i32::MAX) * 2);
    }
}

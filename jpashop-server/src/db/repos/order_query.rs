//! Read-side queries that project straight into response DTOs
//!
//! Nothing here builds entities. The three order listings differ only in
//! how order lines are attached:
//! - `find_order_query_dtos`: one line query per order (1 + N)
//! - `find_all_by_dto_optimization`: one `IN` query for all orders
//! - `find_all_by_dto_flat`: one join, one row per line

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use jpashop_core::{Address, OrderStatus};

use super::{rows, DbError};

/// Order header with the member name and delivery address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSimpleQueryDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Option<Address>,
}

/// Order header plus its lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Option<Address>,
    pub order_items: Vec<OrderItemQueryDto>,
}

/// One order line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQueryDto {
    /// Used to group lines; not part of the response
    #[serde(skip_serializing)]
    pub order_id: i64,
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

/// One row of the flattened order/line join
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFlatDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Option<Address>,
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

const ORDER_HEADER_SQL: &str = r#"
    SELECT o.order_id, m.name AS member_name, o.order_date, o.status AS order_status,
           d.city AS delivery_city, d.street AS delivery_street, d.zipcode AS delivery_zipcode
    FROM orders o
    JOIN member m ON m.member_id = o.member_id
    JOIN delivery d ON d.delivery_id = o.delivery_id
    ORDER BY o.order_id
"#;

/// DTO query repository
pub struct OrderQueryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderQueryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Order headers in id order, lines left empty.
    pub async fn find_orders(&self) -> Result<Vec<OrderQueryDto>, DbError> {
        let records = sqlx::query(ORDER_HEADER_SQL).fetch_all(self.pool).await?;
        Ok(records.iter().map(order_header).collect::<Result<_, _>>()?)
    }

    /// Lines of one order.
    pub async fn find_order_items(&self, order_id: i64) -> Result<Vec<OrderItemQueryDto>, DbError> {
        let records = sqlx::query(
            r#"
            SELECT oi.order_id, i.name AS item_name, oi.order_price, oi.count
            FROM order_item oi
            JOIN item i ON i.item_id = oi.item_id
            WHERE oi.order_id = ?
            ORDER BY oi.order_item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records.iter().map(order_item).collect::<Result<_, _>>()?)
    }

    /// Headers, then one line query per order.
    pub async fn find_order_query_dtos(&self) -> Result<Vec<OrderQueryDto>, DbError> {
        let mut orders = self.find_orders().await?;
        for order in &mut orders {
            order.order_items = self.find_order_items(order.order_id).await?;
        }
        Ok(orders)
    }

    /// Headers, then every line in a single `IN` query matched by order id.
    pub async fn find_all_by_dto_optimization(&self) -> Result<Vec<OrderQueryDto>, DbError> {
        let mut orders = self.find_orders().await?;
        if orders.is_empty() {
            return Ok(orders);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT oi.order_id, i.name AS item_name, oi.order_price, oi.count
            FROM order_item oi
            JOIN item i ON i.item_id = oi.item_id
            WHERE oi.order_id IN (
            "#,
        );
        let mut ids = builder.separated(", ");
        for order in &orders {
            ids.push_bind(order.order_id);
        }
        ids.push_unseparated(") ORDER BY oi.order_item_id");

        let records = builder.build().fetch_all(self.pool).await?;

        let mut by_order: HashMap<i64, Vec<OrderItemQueryDto>> = HashMap::new();
        for r in &records {
            let line = order_item(r)?;
            by_order.entry(line.order_id).or_default().push(line);
        }

        for order in &mut orders {
            order.order_items = by_order.remove(&order.order_id).unwrap_or_default();
        }
        Ok(orders)
    }

    /// One row per order line, in order then line id order.
    pub async fn find_all_by_dto_flat(&self) -> Result<Vec<OrderFlatDto>, DbError> {
        let records = sqlx::query(
            r#"
            SELECT o.order_id, m.name AS member_name, o.order_date, o.status AS order_status,
                   d.city AS delivery_city, d.street AS delivery_street, d.zipcode AS delivery_zipcode,
                   i.name AS item_name, oi.order_price, oi.count
            FROM orders o
            JOIN member m ON m.member_id = o.member_id
            JOIN delivery d ON d.delivery_id = o.delivery_id
            JOIN order_item oi ON oi.order_id = o.order_id
            JOIN item i ON i.item_id = oi.item_id
            ORDER BY o.order_id, oi.order_item_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        records
            .iter()
            .map(|r| -> Result<OrderFlatDto, DbError> {
                Ok(OrderFlatDto {
                    order_id: r.try_get("order_id")?,
                    name: r.try_get("member_name")?,
                    order_date: r.try_get("order_date")?,
                    order_status: rows::order_status(r)?,
                    address: rows::address(r, "delivery")?,
                    item_name: r.try_get("item_name")?,
                    order_price: r.try_get("order_price")?,
                    count: r.try_get("count")?,
                })
            })
            .collect()
    }
}

fn order_header(row: &SqliteRow) -> Result<OrderQueryDto, sqlx::Error> {
    Ok(OrderQueryDto {
        order_id: row.try_get("order_id")?,
        name: row.try_get("member_name")?,
        order_date: row.try_get("order_date")?,
        order_status: rows::order_status(row)?,
        address: rows::address(row, "delivery")?,
        order_items: Vec::new(),
    })
}

fn order_item(row: &SqliteRow) -> Result<OrderItemQueryDto, sqlx::Error> {
    Ok(OrderItemQueryDto {
        order_id: row.try_get("order_id")?,
        item_name: row.try_get("item_name")?,
        order_price: row.try_get("order_price")?,
        count: row.try_get("count")?,
    })
}

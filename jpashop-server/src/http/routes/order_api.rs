//! Order listings including order lines
//!
//! Every version returns the same orders; they differ in query shape:
//! - v1: entities, everything loaded per order
//! - v2: `OrderDto`, member, delivery, lines and items loaded per row
//! - v3: `OrderDto` from one join over all five tables, folded per order
//! - v3.1: ToOne join with paging, lines batch-fetched with `IN`
//! - v4: `OrderQueryDto`, one line query per order
//! - v5: `OrderQueryDto`, one `IN` query for all lines
//! - v6: `OrderFlatDto`, one row per line

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use jpashop_core::{Address, Order, OrderItem, OrderSearch, OrderStatus};

use crate::db::{OrderFlatDto, OrderQueryDto, OrderQueryRepo, OrderRepo};
use crate::http::error::ApiError;
use crate::models::{OffsetLimit, OffsetLimitParams};
use crate::service::OrderService;
use crate::state::AppState;

/// Order with its lines, detached from the entities
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Option<Address>,
    pub order_items: Vec<OrderItemDto>,
}

/// One order line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

impl From<OrderItem> for OrderItemDto {
    fn from(line: OrderItem) -> Self {
        Self {
            item_name: line.item.name,
            order_price: line.order_price,
            count: line.count,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            name: order.member.name,
            order_date: order.order_date,
            order_status: order.status,
            address: order.delivery.address,
            order_items: order.order_items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

/// GET /api/v1/orders - full entities
async fn orders_v1(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = OrderService::new(&state.pool)
        .find_orders(&OrderSearch::default())
        .await?;
    Ok(Json(orders))
}

/// GET /api/v2/orders - every association loaded by its own query
async fn orders_v2(State(state): State<Arc<AppState>>) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let repo = OrderRepo::new(&state.pool);
    let rows = repo.find_all_by_search(&OrderSearch::default()).await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for row in rows {
        let member = repo.find_member(row.member_id).await?;
        let delivery = repo.find_delivery(row.delivery_id).await?;

        let mut order_items = Vec::new();
        for line in repo.find_order_items(row.id).await? {
            order_items.push(OrderItem {
                id: line.id,
                item: repo.find_item(line.item_id).await?,
                order_price: line.order_price,
                count: line.count,
            });
        }

        dtos.push(OrderDto::from(Order {
            id: row.id,
            member,
            order_items,
            delivery,
            order_date: row.order_date,
            status: row.status,
        }));
    }
    Ok(Json(dtos))
}

/// GET /api/v3/orders - one join, duplicates folded per order
async fn orders_v3(State(state): State<Arc<AppState>>) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let orders = OrderRepo::new(&state.pool).find_all_with_item().await?;
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

/// GET /api/v3.1/orders?offset=&limit= - paged ToOne join plus batched lines
async fn orders_v3_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OffsetLimitParams>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let page = OffsetLimit::from(params);
    let repo = OrderRepo::new(&state.pool);

    let mut orders = repo.find_all_with_member_delivery(Some(page)).await?;
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut lines = repo
        .find_order_items_in(&ids, state.batch_fetch_size())
        .await?;

    for order in &mut orders {
        order.order_items = lines.remove(&order.id).unwrap_or_default();
    }
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

/// GET /api/v4/orders - DTO query, 1 + N
async fn orders_v4(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderQueryDto>>, ApiError> {
    Ok(Json(OrderQueryRepo::new(&state.pool).find_order_query_dtos().await?))
}

/// GET /api/v5/orders - DTO query, lines in one `IN` query
async fn orders_v5(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderQueryDto>>, ApiError> {
    Ok(Json(
        OrderQueryRepo::new(&state.pool)
            .find_all_by_dto_optimization()
            .await?,
    ))
}

/// GET /api/v6/orders - flat rows, one per order line
async fn orders_v6(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderFlatDto>>, ApiError> {
    Ok(Json(OrderQueryRepo::new(&state.pool).find_all_by_dto_flat().await?))
}

/// Order listing routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/orders", get(orders_v1))
        .route("/api/v2/orders", get(orders_v2))
        .route("/api/v3/orders", get(orders_v3))
        .route("/api/v3.1/orders", get(orders_v3_page))
        .route("/api/v4/orders", get(orders_v4))
        .route("/api/v5/orders", get(orders_v5))
        .route("/api/v6/orders", get(orders_v6))
}

//! Order listings without the order lines
//!
//! | path                     | shape              | queries          |
//! |--------------------------|--------------------|------------------|
//! | `/api/v1/simple-orders`  | entity             | 1 + 2N           |
//! | `/api/v2/simple-orders`  | `SimpleOrderDto`   | 1 + 2N           |
//! | `/api/v3/simple-orders`  | `SimpleOrderDto`   | 1 (join)         |
//! | `/api/v4/simple-orders`  | query projection   | 1 (join)         |

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use jpashop_core::{Address, Delivery, Member, Order, OrderItem, OrderSearch, OrderStatus};

use crate::db::{OrderRepo, OrderSimpleQueryDto};
use crate::http::error::ApiError;
use crate::state::AppState;

/// The order entity as stored, with lines left unloaded (`null`)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntityView {
    pub id: i64,
    pub member: Member,
    pub order_items: Option<Vec<OrderItem>>,
    pub delivery: Delivery,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Order header for the simple listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleOrderDto {
    pub order_id: i64,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Option<Address>,
}

impl From<Order> for SimpleOrderDto {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            name: order.member.name,
            order_date: order.order_date,
            order_status: order.status,
            address: order.delivery.address,
        }
    }
}

/// GET /api/v1/simple-orders - entities, member and delivery loaded per order
async fn simple_orders_v1(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderEntityView>>, ApiError> {
    let repo = OrderRepo::new(&state.pool);
    let rows = repo.find_all_by_search(&OrderSearch::default()).await?;

    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(OrderEntityView {
            id: row.id,
            member: repo.find_member(row.member_id).await?,
            order_items: None,
            delivery: repo.find_delivery(row.delivery_id).await?,
            order_date: row.order_date,
            status: row.status,
        });
    }
    Ok(Json(views))
}

/// GET /api/v2/simple-orders - DTOs, member and delivery loaded per order
async fn simple_orders_v2(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SimpleOrderDto>>, ApiError> {
    let repo = OrderRepo::new(&state.pool);
    let rows = repo.find_all_by_search(&OrderSearch::default()).await?;

    let mut dtos = Vec::with_capacity(rows.len());
    for row in rows {
        let member = repo.find_member(row.member_id).await?;
        let delivery = repo.find_delivery(row.delivery_id).await?;
        dtos.push(SimpleOrderDto {
            order_id: row.id,
            name: member.name,
            order_date: row.order_date,
            order_status: row.status,
            address: delivery.address,
        });
    }
    tracing::debug!(orders = dtos.len(), "simple orders loaded per row");
    Ok(Json(dtos))
}

/// GET /api/v3/simple-orders - DTOs from one ToOne join
async fn simple_orders_v3(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SimpleOrderDto>>, ApiError> {
    let orders = OrderRepo::new(&state.pool)
        .find_all_with_member_delivery(None)
        .await?;
    Ok(Json(orders.into_iter().map(SimpleOrderDto::from).collect()))
}

/// GET /api/v4/simple-orders - projection selected straight from SQL
async fn simple_orders_v4(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderSimpleQueryDto>>, ApiError> {
    Ok(Json(OrderRepo::new(&state.pool).find_order_dtos().await?))
}

/// Simple order routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/simple-orders", get(simple_orders_v1))
        .route("/api/v2/simple-orders", get(simple_orders_v2))
        .route("/api/v3/simple-orders", get(simple_orders_v3))
        .route("/api/v4/simple-orders", get(simple_orders_v4))
}

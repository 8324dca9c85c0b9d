//! Order commands and the search listing

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use jpashop_core::{Count, Order, OrderSearch, OrderStatus, ValidationError};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::service::OrderService;
use crate::state::AppState;

/// Place-order request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub member_id: i64,
    pub item_id: i64,
    pub count: i32,
}

/// Place-order response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: i64,
}

/// Search query; blank values mean "no filter", as sent by an empty form
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearchParams {
    pub member_name: Option<String>,
    pub order_status: Option<String>,
}

impl TryFrom<OrderSearchParams> for OrderSearch {
    type Error = ValidationError;

    fn try_from(params: OrderSearchParams) -> Result<Self, Self::Error> {
        let order_status = match params.order_status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(status) => Some(status.parse::<OrderStatus>()?),
        };
        Ok(Self {
            member_name: params.member_name,
            order_status,
        })
    }
}

/// POST /api/orders
async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    let count = Count::new(req.count)?;
    let order_id = OrderService::new(&state.pool)
        .order(req.member_id, req.item_id, count)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateOrderResponse { order_id })))
}

/// POST /api/orders/{id}/cancel
async fn cancel_order(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    OrderService::new(&state.pool).cancel_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/orders/{id}/delivery/complete
async fn complete_delivery(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    OrderService::new(&state.pool).complete_delivery(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/orders?memberName=&orderStatus=
async fn search_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OrderSearchParams>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let search = OrderSearch::try_from(params)?;
    Ok(Json(OrderService::new(&state.pool).find_orders(&search).await?))
}

/// Order command routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/orders", get(search_orders).post(create_order))
        .route("/api/orders/{id}/cancel", post(cancel_order))
        .route("/api/orders/{id}/delivery/complete", post(complete_delivery))
}

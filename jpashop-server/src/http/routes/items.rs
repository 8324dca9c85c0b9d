//! Item endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use jpashop_core::domain::ItemDraft;
use jpashop_core::{Item, ItemKind, Price, ValidationError};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::service::ItemService;
use crate::state::AppState;

/// Create/update body; `dtype` (`B`, `A`, `M`) selects the kind fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub name: String,
    pub price: i32,
    pub stock_quantity: i32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl TryFrom<ItemRequest> for ItemDraft {
    type Error = ValidationError;

    fn try_from(req: ItemRequest) -> Result<Self, Self::Error> {
        ItemDraft::new(&req.name, Price::new(req.price)?, req.stock_quantity, req.kind)
    }
}

/// POST /api/items
async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = ItemService::new(&state.pool).save_item(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(ItemService::new(&state.pool).find_items().await?))
}

/// GET /api/items/{id}
async fn get_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(ItemService::new(&state.pool).find_one(id).await?))
}

/// PUT /api/items/{id}
async fn update_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<ItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let item = ItemService::new(&state.pool)
        .update_item(id, req.try_into()?)
        .await?;
    Ok(Json(item))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", get(get_item).put(update_item))
}

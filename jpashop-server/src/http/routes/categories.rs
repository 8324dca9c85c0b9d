//! Category endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use jpashop_core::Category;

use crate::http::error::ApiError;
use crate::http::extractors::ValidIdPair;
use crate::service::CategoryService;
use crate::state::AppState;

/// Create category request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_id: Option<i64>,
}

/// POST /api/categories
async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = CategoryService::new(&state.pool)
        .create(&req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories - the whole tree
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(CategoryService::new(&state.pool).find_tree().await?))
}

/// POST /api/categories/{id}/items/{itemId}
async fn add_item(
    State(state): State<Arc<AppState>>,
    ValidIdPair(category_id, item_id): ValidIdPair,
) -> Result<StatusCode, ApiError> {
    CategoryService::new(&state.pool)
        .add_item(category_id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/{id}/items/{item_id}", post(add_item))
}

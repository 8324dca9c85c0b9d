//! Member endpoints
//!
//! v1 returns entities as they are; v2 goes through request/response
//! types so the wire format is independent of the entity.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use jpashop_core::{Address, Member, MemberName};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::models::Counted;
use crate::service::MemberService;
use crate::state::AppState;

/// Join request
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub address: Option<Address>,
}

/// Join response
#[derive(Debug, Serialize)]
pub struct CreateMemberResponse {
    pub id: i64,
}

/// Rename request
#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: String,
}

/// Rename response
#[derive(Debug, Serialize)]
pub struct UpdateMemberResponse {
    pub id: i64,
    pub name: String,
}

/// Member as listed by v2
#[derive(Debug, Serialize)]
pub struct MemberDto {
    pub name: String,
}

/// GET /api/v1/members - entities
async fn list_members_v1(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Member>>, ApiError> {
    Ok(Json(MemberService::new(&state.pool).find_members().await?))
}

/// GET /api/v2/members - names wrapped with a count
async fn list_members_v2(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Counted<MemberDto>>, ApiError> {
    let members = MemberService::new(&state.pool).find_members().await?;
    let dtos: Vec<MemberDto> = members
        .into_iter()
        .map(|m| MemberDto { name: m.name })
        .collect();
    Ok(Json(Counted::from(dtos)))
}

/// POST /api/v1/members and /api/v2/members - join
async fn create_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<CreateMemberResponse>), ApiError> {
    let name = MemberName::new(&req.name)?;
    let id = MemberService::new(&state.pool).join(name, req.address).await?;
    Ok((StatusCode::CREATED, Json(CreateMemberResponse { id })))
}

/// PUT /api/v2/members/{id} - rename
async fn update_member(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<UpdateMemberResponse>, ApiError> {
    let name = MemberName::new(&req.name)?;
    let member = MemberService::new(&state.pool).update(id, name).await?;
    Ok(Json(UpdateMemberResponse {
        id: member.id,
        name: member.name,
    }))
}

/// GET /api/members/{id}
async fn get_member(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Member>, ApiError> {
    Ok(Json(MemberService::new(&state.pool).find_one(id).await?))
}

/// Member routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/members", get(list_members_v1).post(create_member))
        .route("/api/v2/members", get(list_members_v2).post(create_member))
        .route("/api/v2/members/{id}", put(update_member))
        .route("/api/members/{id}", get(get_member))
}

//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::OrderDetail;
use crate::utils::{ApiResponse, AppResult, created, ok};
use shared::order::{OrderCreate, OrderUpdate};

/// POST /api/order - 提交订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    let detail = state.orders.create(payload).await?;
    Ok(created(detail))
}

/// PUT /api/order/{id} - 更新订单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = state.orders.update(&id, payload).await?;
    Ok(ok(detail))
}

/// GET /api/order - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<OrderDetail>>>> {
    let orders = state.orders.list().await?;
    Ok(ok(orders))
}

/// GET /api/order/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = state.orders.get(&id).await?;
    Ok(ok(detail))
}

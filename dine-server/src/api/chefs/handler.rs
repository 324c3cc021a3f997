//! Chef API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::db::models::{Chef, ChefCreate};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppResult, created, ok};

/// GET /api/chef - 获取厨师名单及当前负载
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Chef>>>> {
    let chefs = state.chefs().find_all().await?;
    Ok(ok(chefs))
}

/// POST /api/chef - 添加厨师 (负载从 0 开始)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ChefCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Chef>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let chef = state.chefs().create(payload).await?;
    tracing::info!(chef_id = ?chef.id.as_ref().map(ToString::to_string), "Chef created");
    Ok(created(chef))
}

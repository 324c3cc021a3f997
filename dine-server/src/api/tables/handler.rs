//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, TABLE_SIZES};
use crate::db::repository::{RepoError, dining_table, parse_record_id};
use crate::utils::validation::{MAX_NAME_LEN, validate_positive, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, created, ok};

/// GET /api/table - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let tables = state.tables().find_all().await?;
    Ok(ok(tables))
}

/// GET /api/table/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let not_found = || {
        AppError::with_message(ErrorCode::TableNotFound, format!("Table {} not found", id))
    };
    let record = parse_record_id(dining_table::TABLE, &id).ok_or_else(not_found)?;
    let table = state
        .tables()
        .find_by_id(&record)
        .await?
        .ok_or_else(not_found)?;
    Ok(ok(table))
}

/// POST /api/table - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<DiningTable>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.number, "number")?;
    if !TABLE_SIZES.contains(&payload.table_size) {
        return Err(AppError::new(ErrorCode::TableSizeInvalid)
            .with_detail("table_size", payload.table_size));
    }

    let number = payload.number;
    let table = state.tables().create(payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => {
            AppError::with_message(ErrorCode::TableNumberExists, msg).with_detail("number", number)
        }
        other => other.into(),
    })?;

    tracing::info!(
        table_id = ?table.id.as_ref().map(ToString::to_string),
        number = table.number,
        capacity = table.capacity,
        "Table created"
    );
    Ok(created(table))
}

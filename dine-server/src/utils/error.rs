//! Error re-exports and response helpers
//!
//! Handlers return [`AppResult`] and wrap payloads with [`ok`] or [`created`].

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 200 with the payload wrapped in the unified envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// 201 with the payload wrapped in the unified envelope
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/order | POST | 提交订单 (分配桌台与厨师) |
//! | /api/order | GET | 全部订单，最新在前 |
//! | /api/order/{id} | GET | 单个订单 |
//! | /api/order/{id} | PUT | 更新 averageTime / status |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}

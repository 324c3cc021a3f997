//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单提交与状态更新
//! - [`tables`] - 桌台管理接口
//! - [`chefs`] - 厨师管理接口

pub mod chefs;
pub mod health;
pub mod orders;
pub mod tables;

pub use crate::utils::{ApiResponse, AppResult};

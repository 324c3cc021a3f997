//! Dine Server - 餐厅桌台与厨房调度服务
//!
//! # 架构概述
//!
//! 下单时为堂食订单分配合适的桌台，并把订单派给当前负载最低的厨师；
//! 订单进入 `served` 后释放桌台、递减厨师负载。
//!
//! - **订单** (`orders`): TableAllocator + ChefBalancer + OrderLifecycle
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! dine-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 数据库层 (models + repository)
//! ├── orders/        # 桌台分配、厨师调度、订单生命周期
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和中间件
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use orders::{ChefBalancer, OrderLifecycle, TableAllocator};
pub use routes::{build_app, build_router};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env，初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  _
   / __ \(_)___  ___
  / / / / / __ \/ _ \
 / /_/ / / / / /  __/
/_____/_/_/ /_/\___/
    "#
    );
}

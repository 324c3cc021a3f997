use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{ChefRepository, DiningTableRepository};
use crate::orders::OrderLifecycle;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (SurrealDB 句柄内部为 Arc)，每个请求拿到一份拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | orders | OrderLifecycle | 订单生命周期 (桌台分配 + 厨师调度) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 订单生命周期管理
    pub orders: OrderLifecycle,
}

impl ServerState {
    /// 用已打开的数据库构造状态
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let orders = OrderLifecycle::new(db.clone(), &config);
        Self { config, db, orders }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (work_dir/database/dine.db，或内存)
    /// 2. 订单生命周期 (TableAllocator + ChefBalancer)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db_service = DbService::new(config)
            .await
            .map_err(|e| ServerError::Database(e.message))?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    pub fn tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.db.clone())
    }

    pub fn chefs(&self) -> ChefRepository {
        ChefRepository::new(self.db.clone())
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::orders::balancer;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DB_MEMORY | false | 使用内存数据库 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志文件目录 |
/// | DEFAULT_AVERAGE_TIME | 15 | 默认备餐时间(分钟) |
/// | CHEF_ASSIGN_MAX_ATTEMPTS | 8 | 分配厨师 CAS 重试次数 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/dine HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库与日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 使用内存数据库 (测试或演示)
    pub db_memory: bool,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录，未设置时只输出到 stdout
    pub log_dir: Option<String>,
    /// 订单未提供 averageTime 时的默认值 (分钟)
    pub default_average_time: i32,
    /// 分配厨师时 compare-and-swap 的最大尝试次数
    pub chef_assign_max_attempts: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            db_memory: env_or("DB_MEMORY", false),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            default_average_time: env_or("DEFAULT_AVERAGE_TIME", 15).max(1),
            chef_assign_max_attempts: env_or(
                "CHEF_ASSIGN_MAX_ATTEMPTS",
                balancer::DEFAULT_MAX_ATTEMPTS,
            )
            .max(1),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30000),
        }
    }

    /// 测试配置: 内存数据库，不读取环境变量
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir()
                .join("dine-server-test")
                .to_string_lossy()
                .into_owned(),
            http_port: 0,
            environment: "test".into(),
            db_memory: true,
            log_level: "debug".into(),
            log_dir: None,
            default_average_time: 15,
            chef_assign_max_attempts: balancer::DEFAULT_MAX_ATTEMPTS,
            request_timeout_ms: 30000,
        }
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件路径 (work_dir/database/dine.db)
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("dine.db")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tests_uses_memory_db() {
        let config = Config::for_tests();
        assert!(config.db_memory);
        assert_eq!(config.default_average_time, 15);
        assert_eq!(config.chef_assign_max_attempts, 8);
    }

    #[test]
    fn test_database_path_under_work_dir() {
        let mut config = Config::for_tests();
        config.work_dir = "/srv/dine".into();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/dine/database/dine.db")
        );
    }

    #[test]
    fn test_request_timeout() {
        let mut config = Config::for_tests();
        config.request_timeout_ms = 1500;
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    }
}

//! Database Module
//!
//! Embedded SurrealDB (RocksDB on disk, in-memory for tests) and its schema.

pub mod models;
pub mod repository;

use crate::core::Config;
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "dine";
const DATABASE: &str = "dine";

/// Idempotent schema
///
/// Tables are schemaless; the indexes carry the constraints that matter:
/// unique table numbers and the (capacity, occupied) lookup used by allocation.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS dining_table SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS dining_table_number ON TABLE dining_table FIELDS number UNIQUE;
    DEFINE INDEX IF NOT EXISTS dining_table_free ON TABLE dining_table FIELDS capacity, occupied;

    DEFINE TABLE IF NOT EXISTS chef SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS active_orders ON TABLE chef TYPE int DEFAULT 0;

    DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS orders_time ON TABLE orders FIELDS time;
"#;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database described by `config` and apply the schema
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = if config.db_memory {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?
        } else {
            let dir = config.database_dir();
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::database(format!("Failed to create {}: {e}", dir.display()))
            })?;
            let path = config.database_path().to_string_lossy().into_owned();
            Surreal::new::<RocksDb>(path.as_str())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database {path}: {e}")))?
        };

        Self::init(db).await
    }

    /// In-memory database with schema applied
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");
        Ok(Self { db })
    }
}

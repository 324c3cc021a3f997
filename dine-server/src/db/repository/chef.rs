//! Chef Repository
//!
//! The `active_orders` counter is only ever changed by single conditional
//! statements so concurrent requests cannot drive it below zero.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Chef, ChefCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "chef";

#[derive(Clone)]
pub struct ChefRepository {
    base: BaseRepository,
}

impl ChefRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Full roster
    pub async fn find_all(&self) -> RepoResult<Vec<Chef>> {
        let chefs: Vec<Chef> = self
            .base
            .db()
            .query("SELECT * FROM chef ORDER BY name")
            .await?
            .take(0)?;
        Ok(chefs)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Chef>> {
        let chef: Option<Chef> = self.base.db().select(id.clone()).await?;
        Ok(chef)
    }

    /// Create a chef with an empty workload
    pub async fn create(&self, data: ChefCreate) -> RepoResult<Chef> {
        let created: Vec<Chef> = self
            .base
            .db()
            .query("CREATE chef SET name = $name, active_orders = 0")
            .bind(("name", data.name))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create chef".to_string()))
    }

    /// Increment the counter only if it still equals `expected`
    pub async fn increment_if(&self, id: &RecordId, expected: i64) -> RepoResult<Option<Chef>> {
        let updated: Vec<Chef> = self
            .base
            .db()
            .query(
                "UPDATE $id SET active_orders += 1 WHERE active_orders = $expected RETURN AFTER",
            )
            .bind(("id", id.clone()))
            .bind(("expected", expected))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Unconditional increment
    pub async fn increment(&self, id: &RecordId) -> RepoResult<Option<Chef>> {
        let updated: Vec<Chef> = self
            .base
            .db()
            .query("UPDATE $id SET active_orders += 1 RETURN AFTER")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Decrement the counter, never below zero
    ///
    /// Returns None when the chef is missing or already at zero.
    pub async fn decrement_floored(&self, id: &RecordId) -> RepoResult<Option<Chef>> {
        let updated: Vec<Chef> = self
            .base
            .db()
            .query("UPDATE $id SET active_orders -= 1 WHERE active_orders > 0 RETURN AFTER")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }
}

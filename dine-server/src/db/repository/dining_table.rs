//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables ordered by number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> = self.base.db().select(id.clone()).await?;
        Ok(table)
    }

    /// Find table by its number
    pub async fn find_by_number(&self, number: i32) -> RepoResult<Option<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE number = $number")
            .bind(("number", number))
            .await?
            .take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Unoccupied tables with exactly `capacity` seats, lowest number first
    pub async fn find_free_by_capacity(&self, capacity: i32) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE capacity = $capacity AND occupied = false ORDER BY number",
            )
            .bind(("capacity", capacity))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Create a new dining table (starts unoccupied)
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if self.find_by_number(data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                data.number
            )));
        }

        let created: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "CREATE dining_table SET name = $name, number = $number, capacity = $capacity, occupied = false",
            )
            .bind(("name", data.name))
            .bind(("number", data.number))
            .bind(("capacity", data.table_size))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Mark the table occupied if it is currently free
    ///
    /// Returns the updated table, or None when it was already taken or does not exist.
    pub async fn try_occupy(&self, id: &RecordId) -> RepoResult<Option<DiningTable>> {
        let updated: Vec<DiningTable> = self
            .base
            .db()
            .query("UPDATE $id SET occupied = true WHERE occupied = false RETURN AFTER")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Mark the table free if it is currently occupied
    ///
    /// Returns false when the table was already free or does not exist.
    pub async fn release(&self, id: &RecordId) -> RepoResult<bool> {
        let updated: Vec<DiningTable> = self
            .base
            .db()
            .query("UPDATE $id SET occupied = false WHERE occupied = true RETURN AFTER")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }
}

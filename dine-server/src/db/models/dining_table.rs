//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Seat counts a table may have
pub const TABLE_SIZES: [i32; 4] = [2, 4, 6, 8];

/// Dining table entity (桌台)
///
/// Stored snake_case, served camelCase (`capacity` is exposed as `tableSize`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Unique, positive
    pub number: i32,
    /// Seat count, one of [`TABLE_SIZES`]
    #[serde(rename(serialize = "tableSize"))]
    pub capacity: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub occupied: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub table_size: i32,
}

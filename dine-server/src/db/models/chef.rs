//! Chef Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Kitchen staff member with a live load counter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Chef {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Non-terminal orders currently assigned; never negative
    #[serde(default, deserialize_with = "serde_helpers::int_zero")]
    pub active_orders: i64,
}

/// Create chef payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefCreate {
    #[serde(default)]
    pub name: String,
}

//! Order Model
//!
//! [`Order`] is the stored record with chef/table links; [`OrderDetail`] is the
//! same record with both links fetched.

use super::serde_helpers;
use super::{Chef, DiningTable};
use serde::{Deserialize, Serialize};
use shared::order::{OrderItemInput, OrderStatus};
use surrealdb::RecordId;

/// Stored order record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub number_of_people: i32,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub order_item: Vec<OrderItemInput>,
    /// Preparation estimate in minutes
    pub average_time: i32,
    /// Creation time (Unix millis)
    pub time: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub dine_in: bool,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub chef: Option<RecordId>,
    /// Present only for dine-in orders
    #[serde(
        default,
        rename(serialize = "table"),
        with = "serde_helpers::option_record_id"
    )]
    pub dining_table: Option<RecordId>,
}

/// Order with chef and table resolved to full records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct OrderDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub number_of_people: i32,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub order_item: Vec<OrderItemInput>,
    pub average_time: i32,
    pub time: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub dine_in: bool,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub chef: Option<Chef>,
    #[serde(default, rename(serialize = "table"))]
    pub dining_table: Option<DiningTable>,
}

/// Fields written when an order is first persisted
#[derive(Debug, Clone)]
pub struct OrderCreateRecord {
    pub name: String,
    pub number_of_people: i32,
    pub address: String,
    pub phone_number: String,
    pub order_item: Vec<OrderItemInput>,
    pub average_time: i32,
    pub time: i64,
    pub dine_in: bool,
    pub chef: RecordId,
    pub dining_table: Option<RecordId>,
}

/// Partial update applied in one write
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        self.average_time.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_row() -> serde_json::Value {
        serde_json::json!({
            "id": "orders:o1",
            "name": "Ada",
            "number_of_people": 2,
            "address": "1 Main St",
            "phone_number": "5551234",
            "order_item": [{"name": "Soup", "category": "starter", "quantity": 1, "price": 4.5}],
            "average_time": 15,
            "time": 1_700_000_000_000_i64,
            "dine_in": true,
            "status": "processing",
            "chef": "chef:c1",
            "dining_table": "dining_table:t1"
        })
    }

    #[test]
    fn test_order_reads_snake_case_and_serves_camel_case() {
        let order: Order = serde_json::from_value(stored_row()).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.dining_table.as_ref().unwrap().to_string(), "dining_table:t1");

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["numberOfPeople"], 2);
        assert_eq!(json["phoneNumber"], "5551234");
        assert_eq!(json["averageTime"], 15);
        assert_eq!(json["table"], "dining_table:t1");
        assert_eq!(json["chef"], "chef:c1");
        assert_eq!(json["status"], "processing");
    }

    #[test]
    fn test_detail_with_populated_links() {
        let mut row = stored_row();
        row["chef"] = serde_json::json!({"id": "chef:c1", "name": "Remy", "active_orders": 1});
        row["dining_table"] = serde_json::json!({
            "id": "dining_table:t1", "name": "Window", "number": 1, "capacity": 2, "occupied": true
        });

        let detail: OrderDetail = serde_json::from_value(row).unwrap();
        assert_eq!(detail.chef.as_ref().unwrap().active_orders, 1);
        assert!(detail.dining_table.as_ref().unwrap().occupied);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["chef"]["activeOrders"], 1);
        assert_eq!(json["table"]["tableSize"], 2);
    }

    #[test]
    fn test_takeaway_detail_has_no_table() {
        let mut row = stored_row();
        row["chef"] = serde_json::json!({"id": "chef:c1", "name": "Remy", "active_orders": 0});
        row["dining_table"] = serde_json::Value::Null;
        row["dine_in"] = serde_json::json!(false);
        let detail: OrderDetail = serde_json::from_value(row).unwrap();
        assert!(detail.dining_table.is_none());
        assert!(!detail.dine_in);
        assert_eq!(detail.chef.unwrap().name, "Remy");
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = OrderPatch {
            average_time: None,
            status: Some(OrderStatus::Served),
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"status": "served"})
        );
        assert!(OrderPatch::default().is_empty());
    }
}

//! Order request payloads
//!
//! Field names follow the public JSON API (camelCase).

use serde::{Deserialize, Deserializer, Serialize};

use super::status::OrderStatus;

// ============================================================================
// Order Items
// ============================================================================

fn default_quantity() -> i32 {
    1
}

/// Line item as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemInput {
    pub name: String,
    pub category: String,
    /// Defaults to 1 when omitted
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Unit price
    pub price: f64,
}

// ============================================================================
// Commands
// ============================================================================

/// Submit order payload (`POST /api/order`)
///
/// Missing text fields deserialize as empty strings so the server reports them
/// as validation errors rather than body rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub name: String,
    /// Party size; only checked for dine-in orders
    #[serde(default)]
    pub number_of_people: i32,
    #[serde(default)]
    pub address: String,
    /// Accepts either a JSON string or number
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone_number: String,
    #[serde(default)]
    pub order_item: Vec<OrderItemInput>,
    #[serde(default)]
    pub dine_in: bool,
    /// Preparation estimate in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_time: Option<i32>,
}

/// Update order payload (`PUT /api/order/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_time: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct PhoneVisitor;

    impl<'de> Visitor<'de> for PhoneVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a phone number as string or integer")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(PhoneVisitor)
}

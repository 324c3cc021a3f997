//! Order status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// `Processing` is the initial state and `Served` the only terminal one.
/// Intermediate kitchen states ("cooking", "ready", ...) are carried verbatim in
/// `Other` and never release resources.
///
/// Stored and transmitted as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Processing,
    Served,
    Other(String),
}

impl OrderStatus {
    pub const PROCESSING: &'static str = "processing";
    pub const SERVED: &'static str = "served";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Processing => Self::PROCESSING,
            Self::Served => Self::SERVED,
            Self::Other(s) => s.as_str(),
        }
    }

    /// Whether the status carries no text (`""` or whitespace)
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(s) if s.is_empty())
    }

    /// Whether this status ends the order and frees its table and chef
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Served)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(Self::PROCESSING) {
            Self::Processing
        } else if trimmed.eq_ignore_ascii_case(Self::SERVED) {
            Self::Served
        } else {
            Self::Other(trimmed.to_string())
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

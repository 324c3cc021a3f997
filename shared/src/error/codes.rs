//! Unified error codes for the dine dispatch server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Kitchen (chef) errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Served order cannot move to another status
    OrderAlreadyServed = 4002,
    /// Order has no line items
    OrderEmpty = 4007,
    /// Order line item is malformed
    OrderItemInvalid = 4008,

    // ==================== 5xxx: Kitchen ====================
    /// No chef exists to take the order
    NoChefsAvailable = 5002,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// No free table large enough for the party
    TableUnavailable = 7004,
    /// Party is larger than the biggest table tier
    PartySizeUnsupported = 7005,
    /// Table size outside the supported tiers
    TableSizeInvalid = 7006,
    /// Table number already exists
    TableNumberExists = 7007,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// System busy (write conflict, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyServed => "Order has already been served",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderItemInvalid => "Order item is invalid",

            // Kitchen
            ErrorCode::NoChefsAvailable => "No chefs available. Please initialize chefs first.",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableUnavailable => "No table available for this party",
            ErrorCode::PartySizeUnsupported => {
                "We cannot accommodate more than 8 people at a single table"
            }
            ErrorCode::TableSizeInvalid => "Table size must be one of 2, 4, 6 or 8",
            ErrorCode::TableNumberExists => "Table number already exists",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyServed),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderItemInvalid),

            // Kitchen
            5002 => Ok(ErrorCode::NoChefsAvailable),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7004 => Ok(ErrorCode::TableUnavailable),
            7005 => Ok(ErrorCode::PartySizeUnsupported),
            7006 => Ok(ErrorCode::TableSizeInvalid),
            7007 => Ok(ErrorCode::TableNumberExists),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

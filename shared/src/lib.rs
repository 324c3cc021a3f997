//! Shared types for the dine dispatch server
//!
//! Wire-level types used by the server and its clients: the unified error
//! system and the order command payloads.

pub mod error;
pub mod order;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{OrderCreate, OrderItemInput, OrderStatus, OrderUpdate};

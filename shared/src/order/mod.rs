//! Order wire types
//!
//! - [`OrderStatus`]: lifecycle status with `Served` as the terminal state
//! - [`OrderCreate`] / [`OrderUpdate`]: inbound command payloads

pub mod status;
pub mod types;

// Re-exports
pub use status::OrderStatus;
pub use types::{OrderCreate, OrderItemInput, OrderUpdate};

//! Database Models

pub mod serde_helpers;

pub mod chef;
pub mod dining_table;
pub mod order;

pub use chef::{Chef, ChefCreate};
pub use dining_table::{DiningTable, DiningTableCreate, TABLE_SIZES};
pub use order::{Order, OrderCreateRecord, OrderDetail, OrderPatch};

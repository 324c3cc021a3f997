//! Order allocation and lifecycle
//!
//! - **allocator**: reserves a suitably sized dining table
//! - **balancer**: assigns the least-loaded chef
//! - **manager**: composes both when orders are created and served
//!
//! # Data Flow
//!
//! ```text
//! create(order) → validate → TableAllocator → ChefBalancer → persist → detail
//!                               ↑ compensated on any later failure ↓
//! update(status=served) → patch (RETURN BEFORE) → release table + chef (edge only)
//! ```
//!
//! No in-process lock spans a request: every shared counter and flag is
//! changed by one conditional statement against the store.

pub mod allocator;
pub mod balancer;
pub mod manager;

pub use allocator::{MAX_PARTY_SIZE, TableAllocator, required_tier};
pub use balancer::ChefBalancer;
pub use manager::{OrderError, OrderLifecycle, OrderResult};

pub use shared::order::{OrderCreate, OrderItemInput, OrderStatus, OrderUpdate};

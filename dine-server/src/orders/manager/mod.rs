//! OrderLifecycle - order creation and completion
//!
//! # Create Flow
//!
//! ```text
//! create(req)
//!     ├─ 1. Validate (no mutation on failure)
//!     ├─ 2. Reserve table (dine-in only)
//!     ├─ 3. Assign chef          ── failure: release table
//!     ├─ 4. Persist order        ── failure: release chef + table
//!     └─ 5. Return populated detail
//! ```
//!
//! # Update Flow
//!
//! ```text
//! update(id, patch)
//!     ├─ 1. Merge patch, read back previous state (one statement)
//!     │     served orders refuse any other status
//!     ├─ 2. non-served → served edge: release table and chef (one transaction)
//!     │     ── failure: restore previous status so the update can be retried
//!     └─ 3. Return populated detail
//! ```

mod error;
pub use error::*;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::allocator::{MAX_PARTY_SIZE, TableAllocator};
use super::balancer::ChefBalancer;
use crate::core::Config;
use crate::db::models::{Order, OrderCreateRecord, OrderDetail, OrderPatch};
use crate::db::repository::order::TABLE as ORDER_TABLE;
use crate::db::repository::{
    ChefRepository, DiningTableRepository, OrderRepository, RepoError, parse_record_id,
    retry_on_conflict,
};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_positive, validate_required_text,
};
use shared::order::{OrderCreate, OrderUpdate};

/// Attempts for the status patch when the store reports a write conflict
const PATCH_ATTEMPTS: u32 = 8;

/// Attempts for the release transaction when the store reports a write conflict
const RELEASE_ATTEMPTS: u32 = 8;

/// Composes table allocation and chef balancing around the order record
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    allocator: TableAllocator,
    balancer: ChefBalancer,
    default_average_time: i32,
}

impl std::fmt::Debug for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLifecycle")
            .field("default_average_time", &self.default_average_time)
            .finish_non_exhaustive()
    }
}

impl OrderLifecycle {
    /// Build from config with an entropy-seeded balancer
    pub fn new(db: Surreal<Db>, config: &Config) -> Self {
        let balancer = ChefBalancer::new(
            ChefRepository::new(db.clone()),
            config.chef_assign_max_attempts,
        );
        Self::with_balancer(db, balancer, config.default_average_time)
    }

    /// Build with an explicit balancer (seeded random source in tests)
    pub fn with_balancer(db: Surreal<Db>, balancer: ChefBalancer, default_average_time: i32) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            allocator: TableAllocator::new(DiningTableRepository::new(db)),
            balancer,
            default_average_time,
        }
    }

    pub fn allocator(&self) -> &TableAllocator {
        &self.allocator
    }

    pub fn balancer(&self) -> &ChefBalancer {
        &self.balancer
    }

    /// Submit a new order
    pub async fn create(&self, req: OrderCreate) -> OrderResult<OrderDetail> {
        validate_order(&req)?;

        let table = self.allocator.allocate(req.number_of_people, req.dine_in).await?;
        let table_id = table.and_then(|t| t.id);

        let chef_id = match self.balancer.assign().await {
            Ok(chef) => chef.id,
            Err(e) => {
                self.compensate(table_id.as_ref(), None).await;
                return Err(e);
            }
        };
        let Some(chef_id) = chef_id else {
            self.compensate(table_id.as_ref(), None).await;
            return Err(OrderError::NoChefsAvailable);
        };

        let record = OrderCreateRecord {
            name: req.name,
            number_of_people: req.number_of_people,
            address: req.address,
            phone_number: req.phone_number,
            order_item: req.order_item,
            average_time: req.average_time.unwrap_or(self.default_average_time),
            time: chrono::Utc::now().timestamp_millis(),
            dine_in: req.dine_in,
            chef: chef_id.clone(),
            dining_table: table_id.clone(),
        };

        let order = match self.orders.create(record).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist order, rolling back allocation");
                self.compensate(table_id.as_ref(), Some(&chef_id)).await;
                return Err(e.into());
            }
        };

        let Some(order_id) = order.id else {
            return Err(RepoError::Database("Created order has no id".to_string()).into());
        };
        tracing::info!(
            order_id = %order_id,
            chef_id = %chef_id,
            table_id = ?table_id.as_ref().map(ToString::to_string),
            dine_in = order.dine_in,
            "Order created"
        );

        self.detail(&order_id).await
    }

    /// Apply `averageTime` and/or `status` changes
    ///
    /// Moving into `served` releases the order's table and chef exactly once.
    /// `served` is final: a served order only accepts `averageTime` changes.
    pub async fn update(&self, id: &str, update: OrderUpdate) -> OrderResult<OrderDetail> {
        let order_id = parse_order_id(id)?;

        if let Some(average_time) = update.average_time {
            validate_positive(average_time, "averageTime")
                .map_err(|e| OrderError::Validation(e.message))?;
        }
        if update.status.as_ref().is_some_and(|s| s.is_blank()) {
            return Err(OrderError::Validation("status must not be empty".to_string()));
        }

        let patch = OrderPatch {
            average_time: update.average_time,
            status: update.status,
        };
        if patch.is_empty() {
            return self.detail(&order_id).await;
        }
        let serving = patch.status.as_ref().is_some_and(|s| s.is_terminal());
        let leaving_served = patch.status.is_some() && !serving;

        let before = retry_on_conflict(PATCH_ATTEMPTS, || {
            self.orders
                .patch_returning_before(&order_id, patch.clone(), leaving_served)
        })
        .await?;
        let Some(before) = before else {
            // guarded write matched nothing: either missing or already served
            if leaving_served && self.orders.find_by_id(&order_id).await?.is_some() {
                tracing::warn!(order_id = %order_id, "Rejected status change on served order");
                return Err(OrderError::AlreadyServed(order_id.to_string()));
            }
            return Err(OrderError::OrderNotFound(order_id.to_string()));
        };

        if serving && !before.status.is_terminal() {
            tracing::info!(order_id = %order_id, "Order served");
            self.release_resources(&order_id, &before).await?;
        }

        self.detail(&order_id).await
    }

    /// One order with chef and table resolved
    pub async fn get(&self, id: &str) -> OrderResult<OrderDetail> {
        let order_id = parse_order_id(id)?;
        self.detail(&order_id).await
    }

    /// All orders, newest first
    pub async fn list(&self) -> OrderResult<Vec<OrderDetail>> {
        Ok(self.orders.find_all_details().await?)
    }

    async fn detail(&self, order_id: &RecordId) -> OrderResult<OrderDetail> {
        self.orders
            .find_detail(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Free the table and chef held by a just-served order
    ///
    /// `before` is the order as it was prior to the served write. If the
    /// release fails the order gets its previous status back, leaving both
    /// resources held and the served transition open to a retry.
    async fn release_resources(&self, order_id: &RecordId, before: &Order) -> OrderResult<()> {
        let table_id = before.dining_table.as_ref();
        let chef_id = before.chef.as_ref();

        let released = retry_on_conflict(RELEASE_ATTEMPTS, || {
            self.orders.release_links(table_id, chef_id)
        })
        .await;

        if let Err(e) = released {
            tracing::error!(order_id = %order_id, error = %e, "Failed to release resources, reopening order");
            match retry_on_conflict(PATCH_ATTEMPTS, || {
                self.orders.restore_status(order_id, before.status.clone())
            })
            .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(order_id = %order_id, "Order no longer served, status left as is")
                }
                Err(restore) => {
                    tracing::error!(order_id = %order_id, error = %restore, "Failed to restore order status")
                }
            }
            return Err(e.into());
        }

        tracing::info!(
            order_id = %order_id,
            table_id = ?table_id.map(ToString::to_string),
            chef_id = ?chef_id.map(ToString::to_string),
            "Released table and chef"
        );
        Ok(())
    }

    /// Undo side effects of a failed create; failures are logged, not returned
    async fn compensate(&self, table_id: Option<&RecordId>, chef_id: Option<&RecordId>) {
        if let Some(table_id) = table_id
            && let Err(e) = self.allocator.release(table_id).await
        {
            tracing::error!(table_id = %table_id, error = %e, "Failed to release table during rollback");
        }
        if let Some(chef_id) = chef_id
            && let Err(e) = self.balancer.release(chef_id).await
        {
            tracing::error!(chef_id = %chef_id, error = %e, "Failed to release chef during rollback");
        }
    }
}

/// Order ids that cannot name an order are reported as not found
fn parse_order_id(id: &str) -> OrderResult<RecordId> {
    parse_record_id(ORDER_TABLE, id).ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
}

/// Check a submission before anything is reserved
fn validate_order(req: &OrderCreate) -> OrderResult<()> {
    let text = |value: &str, field: &str, max_len: usize| {
        validate_required_text(value, field, max_len).map_err(|e| OrderError::Validation(e.message))
    };

    text(&req.name, "name", MAX_NAME_LEN)?;
    text(&req.address, "address", MAX_ADDRESS_LEN)?;
    text(&req.phone_number, "phoneNumber", MAX_SHORT_TEXT_LEN)?;

    if req.order_item.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    for (index, item) in req.order_item.iter().enumerate() {
        validate_required_text(&item.name, "name", MAX_NAME_LEN)
            .and_then(|_| validate_required_text(&item.category, "category", MAX_SHORT_TEXT_LEN))
            .map_err(|e| OrderError::InvalidItem(format!("orderItem[{index}]: {}", e.message)))?;
        if item.quantity < 1 {
            return Err(OrderError::InvalidItem(format!(
                "orderItem[{index}]: quantity must be at least 1 (got {})",
                item.quantity
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(OrderError::InvalidItem(format!(
                "orderItem[{index}]: price must be a non-negative number"
            )));
        }
    }

    if let Some(average_time) = req.average_time {
        validate_positive(average_time, "averageTime")
            .map_err(|e| OrderError::Validation(e.message))?;
    }

    if req.dine_in && req.number_of_people > MAX_PARTY_SIZE {
        return Err(OrderError::PartySizeUnsupported(req.number_of_people));
    }
    if req.dine_in && req.number_of_people < 1 {
        return Err(OrderError::Validation(format!(
            "numberOfPeople must be at least 1 for dine-in orders (got {})",
            req.number_of_people
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests;

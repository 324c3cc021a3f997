//! Table allocation
//!
//! Party sizes map onto seat tiers (1–2→2, 3–4→4, 5–6→6, 7–8→8). Allocation
//! looks for a free table of the exact tier first, then each larger tier in
//! ascending order; inside a tier the lowest table number wins.

use surrealdb::RecordId;

use super::manager::{OrderError, OrderResult};
use crate::db::models::{DiningTable, TABLE_SIZES};
use crate::db::repository::{DiningTableRepository, RepoError, retry_on_conflict};

/// Largest party a single table can seat
pub const MAX_PARTY_SIZE: i32 = 8;

/// Attempts per candidate when the store reports a write conflict
const CONFLICT_ATTEMPTS: u32 = 3;

/// Smallest seat tier that fits `party_size`, or None if no table can
pub fn required_tier(party_size: i32) -> Option<i32> {
    TABLE_SIZES.iter().copied().find(|&size| party_size >= 1 && party_size <= size)
}

/// Reserves and frees dining tables
#[derive(Clone)]
pub struct TableAllocator {
    tables: DiningTableRepository,
}

impl TableAllocator {
    pub fn new(tables: DiningTableRepository) -> Self {
        Self { tables }
    }

    /// Reserve a table for a dine-in party
    ///
    /// Returns `Ok(None)` for takeaway orders. The returned table is already
    /// marked occupied.
    pub async fn allocate(&self, party_size: i32, dine_in: bool) -> OrderResult<Option<DiningTable>> {
        if !dine_in {
            return Ok(None);
        }

        let tier = match required_tier(party_size) {
            Some(tier) => tier,
            None if party_size > MAX_PARTY_SIZE => {
                return Err(OrderError::PartySizeUnsupported(party_size));
            }
            None => {
                return Err(OrderError::Validation(format!(
                    "numberOfPeople must be at least 1 for dine-in orders (got {party_size})"
                )));
            }
        };

        for capacity in TABLE_SIZES.iter().copied().filter(|&size| size >= tier) {
            let candidates = self.tables.find_free_by_capacity(capacity).await?;
            for candidate in candidates {
                let Some(id) = candidate.id.clone() else {
                    continue;
                };
                if let Some(table) = self.try_occupy(&id).await? {
                    tracing::info!(
                        table_id = %id,
                        table_number = table.number,
                        capacity,
                        party_size,
                        "Table allocated"
                    );
                    return Ok(Some(table));
                }
                tracing::debug!(table_id = %id, party_size, "Table taken concurrently, skipping");
            }
        }

        tracing::info!(party_size, "No table available");
        Err(OrderError::TableUnavailable { party_size })
    }

    /// Free a table; a table that is already free or missing is left as is
    pub async fn release(&self, table_id: &RecordId) -> OrderResult<()> {
        let released =
            retry_on_conflict(CONFLICT_ATTEMPTS, || self.tables.release(table_id)).await?;
        if released {
            tracing::info!(table_id = %table_id, "Table released");
        } else {
            tracing::debug!(table_id = %table_id, "Table already free");
        }
        Ok(())
    }

    /// Conditional occupy; a conflict that persists counts as losing the table
    async fn try_occupy(&self, id: &RecordId) -> OrderResult<Option<DiningTable>> {
        match retry_on_conflict(CONFLICT_ATTEMPTS, || self.tables.try_occupy(id)).await {
            Ok(table) => Ok(table),
            Err(RepoError::Conflict(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(required_tier(1), Some(2));
        assert_eq!(required_tier(2), Some(2));
        assert_eq!(required_tier(3), Some(4));
        assert_eq!(required_tier(4), Some(4));
        assert_eq!(required_tier(5), Some(6));
        assert_eq!(required_tier(6), Some(6));
        assert_eq!(required_tier(7), Some(8));
        assert_eq!(required_tier(8), Some(8));
    }

    #[test]
    fn test_tier_out_of_range() {
        assert_eq!(required_tier(9), None);
        assert_eq!(required_tier(0), None);
        assert_eq!(required_tier(-2), None);
    }
}

//! Chef load balancing
//!
//! Each assignment picks a chef at the roster's minimum `active_orders`
//! (uniformly at random among ties) and increments that chef with a
//! compare-and-swap against the observed count. A lost CAS re-reads the roster.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use surrealdb::RecordId;

use super::manager::{OrderError, OrderResult};
use crate::db::models::Chef;
use crate::db::repository::{ChefRepository, RepoError, retry_on_conflict};

/// Default compare-and-swap attempts before falling back to a plain increment
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Pick a chef with the fewest active orders, breaking ties with `rng`
///
/// Chefs without an id are ignored.
pub fn pick_least_loaded<'a, R: rand::Rng + ?Sized>(
    roster: &'a [Chef],
    rng: &mut R,
) -> Option<&'a Chef> {
    let min = roster
        .iter()
        .filter(|chef| chef.id.is_some())
        .map(|chef| chef.active_orders)
        .min()?;
    let tied: Vec<&Chef> = roster
        .iter()
        .filter(|chef| chef.id.is_some() && chef.active_orders == min)
        .collect();
    tied.choose(rng).copied()
}

/// Assigns orders to chefs and keeps their load counters
#[derive(Clone)]
pub struct ChefBalancer {
    chefs: ChefRepository,
    rng: Arc<Mutex<StdRng>>,
    max_attempts: u32,
}

impl ChefBalancer {
    /// Balancer seeded from OS entropy
    pub fn new(chefs: ChefRepository, max_attempts: u32) -> Self {
        Self::with_rng(chefs, max_attempts, StdRng::from_entropy())
    }

    /// Balancer with an explicit random source (seeded in tests)
    pub fn with_rng(chefs: ChefRepository, max_attempts: u32, rng: StdRng) -> Self {
        Self {
            chefs,
            rng: Arc::new(Mutex::new(rng)),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Assign the least-loaded chef and increment their counter
    ///
    /// Fails with [`OrderError::NoChefsAvailable`] when the roster is empty.
    pub async fn assign(&self) -> OrderResult<Chef> {
        let mut last_pick: Option<RecordId> = None;

        for attempt in 1..=self.max_attempts {
            let roster = self.chefs.find_all().await?;
            let Some((chef_id, observed)) = self.choose(&roster) else {
                tracing::warn!("Chef assignment requested with an empty roster");
                return Err(OrderError::NoChefsAvailable);
            };

            match self.chefs.increment_if(&chef_id, observed).await {
                Ok(Some(chef)) => {
                    tracing::info!(
                        chef_id = %chef_id,
                        active_orders = chef.active_orders,
                        attempt,
                        "Chef assigned"
                    );
                    return Ok(chef);
                }
                Ok(None) | Err(RepoError::Conflict(_)) => {
                    tracing::debug!(chef_id = %chef_id, observed, attempt, "Chef load changed, retrying");
                    last_pick = Some(chef_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let Some(chef_id) = last_pick else {
            return Err(OrderError::NoChefsAvailable);
        };
        tracing::warn!(
            chef_id = %chef_id,
            attempts = self.max_attempts,
            "Chef CAS retries exhausted, incrementing without balance check"
        );
        retry_on_conflict(self.max_attempts, || self.chefs.increment(&chef_id))
            .await?
            .ok_or(OrderError::NoChefsAvailable)
    }

    /// Decrement a chef's counter, floored at zero
    ///
    /// A missing chef or one already at zero is not an error.
    pub async fn release(&self, chef_id: &RecordId) -> OrderResult<()> {
        let updated =
            retry_on_conflict(self.max_attempts, || self.chefs.decrement_floored(chef_id)).await?;
        match updated {
            Some(chef) => tracing::info!(
                chef_id = %chef_id,
                active_orders = chef.active_orders,
                "Chef released"
            ),
            None => tracing::debug!(chef_id = %chef_id, "Chef missing or already idle"),
        }
        Ok(())
    }

    /// Selected chef id and the counter value it was chosen at
    fn choose(&self, roster: &[Chef]) -> Option<(RecordId, i64)> {
        let mut rng = self.rng.lock();
        pick_least_loaded(roster, &mut *rng)
            .and_then(|chef| chef.id.clone().map(|id| (id, chef.active_orders)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn chef(key: &str, active_orders: i64) -> Chef {
        Chef {
            id: Some(RecordId::from_table_key("chef", key)),
            name: key.to_uppercase(),
            active_orders,
        }
    }

    #[test]
    fn test_pick_empty_roster() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_least_loaded(&[], &mut rng).is_none());
    }

    #[test]
    fn test_pick_unique_minimum() {
        let roster = vec![chef("a", 3), chef("b", 1), chef("c", 2)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = pick_least_loaded(&roster, &mut rng).unwrap();
            assert_eq!(picked.name, "B");
        }
    }

    #[test]
    fn test_pick_reaches_every_tied_chef() {
        let roster = vec![chef("a", 0), chef("b", 2), chef("c", 0), chef("d", 0)];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = pick_least_loaded(&roster, &mut rng).unwrap();
            assert_eq!(picked.active_orders, 0);
            seen.insert(picked.name.clone());
        }
        assert_eq!(seen, HashSet::from(["A".to_string(), "C".to_string(), "D".to_string()]));
    }

    #[test]
    fn test_pick_ignores_chefs_without_id() {
        let mut anonymous = chef("x", 0);
        anonymous.id = None;
        let roster = vec![anonymous, chef("b", 4)];
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_least_loaded(&roster, &mut rng).unwrap().name, "B");
    }
}

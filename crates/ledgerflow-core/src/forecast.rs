//! Category expense forecasting with a memoized, content-keyed cache.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;

use ledgerflow_domain::Transaction;

/// Projects the category's expense over the next `periods` months as the
/// mean of its historical monthly expense totals times `periods`. Pure;
/// returns 0 when the category has no expense history.
pub fn project_expenses(cat_id: &str, transactions: &[Transaction], periods: u32) -> i64 {
    let mut monthly: BTreeMap<&str, i64> = BTreeMap::new();
    for t in transactions {
        if t.cat_id == cat_id && t.is_expense() {
            *monthly.entry(t.month_key()).or_insert(0) += t.amount.abs();
        }
    }
    if monthly.is_empty() {
        return 0;
    }
    let total: i64 = monthly.values().sum();
    let mean = total / monthly.len() as i64;
    mean * i64::from(periods)
}

/// Deterministic, order-independent summary of a transaction collection's
/// logical content. Two collections holding the same transactions in any
/// order share a fingerprint; any add, edit, or delete changes it.
pub fn fingerprint(transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .fold(0u64, |acc, t| acc.wrapping_add(content_hash(t)))
}

fn content_hash(t: &Transaction) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.id.hash(&mut hasher);
    t.account_id.hash(&mut hasher);
    t.cat_id.hash(&mut hasher);
    t.amount.hash(&mut hasher);
    t.ts.hash(&mut hasher);
    t.note.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ForecastKey {
    cat_id: String,
    fingerprint: u64,
    periods: u32,
}

/// Memoizes [`project_expenses`] per (category, content fingerprint,
/// horizon).
///
/// Stale entries are invalidated implicitly: a changed collection hashes
/// to a new key. The cache is unbounded for the life of the process;
/// callers needing bounded memory wrap it with an eviction policy
/// externally.
///
/// Concurrency: the map lock is held only to fetch or insert the per-key
/// cell. The computation runs inside `OnceCell::get_or_init`, so
/// concurrent same-key callers coalesce onto one in-flight computation
/// while different keys proceed independently, and a finalized value is
/// immutable thereafter.
#[derive(Debug, Default)]
pub struct ForecastCache {
    slots: Mutex<HashMap<ForecastKey, Arc<OnceCell<i64>>>>,
    misses: AtomicU64,
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached projection, computing it at most once per key.
    pub fn forecast(&self, cat_id: &str, transactions: &[Transaction], periods: u32) -> i64 {
        let key = ForecastKey {
            cat_id: cat_id.to_string(),
            fingerprint: fingerprint(transactions),
            periods,
        };
        let cell = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(slots.entry(key).or_default())
        };
        *cell.get_or_init(|| {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cat_id, periods, "forecast cache miss, computing");
            project_expenses(cat_id, transactions, periods)
        })
    }

    /// Number of projections actually computed (cache misses).
    pub fn computations(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, cat: &str, amount: i64, ts: &str) -> Transaction {
        Transaction::new(id, "a1", cat, amount, ts, "")
    }

    fn history() -> Vec<Transaction> {
        vec![
            tx("t1", "food", -200, "2023-01-05"),
            tx("t2", "food", -100, "2023-01-20"),
            tx("t3", "food", -400, "2023-02-10"),
            tx("t4", "rent", -500, "2023-02-11"),
            tx("t5", "food", 50, "2023-02-15"),
        ]
    }

    #[test]
    fn projection_is_mean_monthly_expense_times_periods() {
        // food: 300 in 2023-01, 400 in 2023-02 -> mean 350.
        assert_eq!(project_expenses("food", &history(), 1), 350);
        assert_eq!(project_expenses("food", &history(), 3), 1050);
    }

    #[test]
    fn projection_without_history_is_zero() {
        assert_eq!(project_expenses("travel", &history(), 6), 0);
    }

    #[test]
    fn fingerprint_ignores_ordering_but_not_content() {
        let forward = history();
        let mut reversed = history();
        reversed.reverse();
        assert_eq!(fingerprint(&forward), fingerprint(&reversed));

        let mut edited = history();
        edited[0].amount = -201;
        assert_ne!(fingerprint(&forward), fingerprint(&edited));

        let mut shorter = history();
        shorter.pop();
        assert_ne!(fingerprint(&forward), fingerprint(&shorter));
    }

    #[test]
    fn cache_computes_once_per_logical_content() {
        let cache = ForecastCache::new();
        let forward = history();
        let mut reversed = history();
        reversed.reverse();

        let first = cache.forecast("food", &forward, 2);
        let second = cache.forecast("food", &reversed, 2);
        assert_eq!(first, second);
        assert_eq!(cache.computations(), 1);

        // A content change is a new key and recomputes.
        let mut edited = history();
        edited[0].amount = -300;
        cache.forecast("food", &edited, 2);
        assert_eq!(cache.computations(), 2);

        // So is a different horizon.
        cache.forecast("food", &forward, 5);
        assert_eq!(cache.computations(), 3);
    }

    #[test]
    fn concurrent_same_key_requests_coalesce() {
        let cache = ForecastCache::new();
        let transactions = history();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(cache.forecast("food", &transactions, 2), 700);
                });
            }
        });

        assert_eq!(cache.computations(), 1);
    }
}

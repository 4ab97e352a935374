//! Memo Statistics Module
//!
//! Tracks memoization metrics including hits, computations, and failures.

use serde::Serialize;

// == Memo Stats ==
/// Tracks memoization metrics for one cache instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    /// Number of lookups answered from a stored result
    pub hits: u64,
    /// Number of lookups that had to run the computation
    pub misses: u64,
    /// Number of computations that returned an error (never stored)
    pub failures: u64,
    /// Current number of stored results
    pub total_entries: usize,
}

impl MemoStats {
    // == Constructor ==
    /// Creates a new MemoStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Successes ==
    /// Number of computations whose result was stored.
    ///
    /// Every miss runs the computation once; the ones that did not fail are
    /// exactly the results that made it into the cache.
    pub fn successes(&self) -> u64 {
        self.misses.saturating_sub(self.failures)
    }

    // == Failure Rate ==
    /// Fraction of computations that failed, or 0.0 if none ran.
    pub fn failure_rate(&self) -> f64 {
        if self.misses == 0 {
            0.0
        } else {
            self.failures as f64 / self.misses as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Failure ==
    /// Increments the failure counter.
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

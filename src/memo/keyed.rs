//! Keyed Memo Cache Module
//!
//! Write-once memoization of computations keyed by their argument sequence.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::MemoConfig;
use crate::error::{MemoError, Result};
use crate::memo::{MemoEntry, MemoKey, MemoStats};

// == Keyed Memo Cache ==
/// Stores at most one result per distinct argument combination.
///
/// Results are computed lazily on first request and never recomputed,
/// overwritten, or evicted for the life of the cache.
#[derive(Debug)]
pub struct KeyedMemoCache<T> {
    /// Stored results by structural key
    entries: HashMap<MemoKey, MemoEntry<T>>,
    /// Lookup statistics
    stats: MemoStats,
    /// Whether per-entry hit counters are maintained
    track_entry_hits: bool,
}

impl<T> Default for KeyedMemoCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KeyedMemoCache<T> {
    // == Constructors ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty cache with room for `capacity` results.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            stats: MemoStats::new(),
            track_entry_hits: true,
        }
    }

    /// Creates an empty cache from configuration.
    pub fn from_config(config: &MemoConfig) -> Self {
        let mut cache = Self::with_capacity(config.initial_capacity);
        cache.track_entry_hits = config.track_entry_hits;
        cache
    }

    // == Get Or Compute ==
    /// Returns the result for `args`, invoking `compute` only if no result is
    /// stored for this argument combination yet.
    ///
    /// # Errors
    /// Returns `MemoError::KeyDerivation` if `args` cannot be turned into a key;
    /// `compute` is not invoked in that case.
    pub fn get_or_compute<A, F>(&mut self, args: &A, compute: F) -> Result<&T>
    where
        A: Serialize + ?Sized,
        F: FnOnce(&A) -> T,
    {
        self.try_get_or_compute(args, |args| Ok::<T, MemoError>(compute(args)))
    }

    // == Try Get Or Compute ==
    /// Fallible form of [`KeyedMemoCache::get_or_compute`].
    ///
    /// A failed computation stores nothing; the error is returned as-is and the
    /// next call with the same arguments runs the computation again.
    pub fn try_get_or_compute<A, F, E>(
        &mut self,
        args: &A,
        compute: F,
    ) -> std::result::Result<&T, E>
    where
        A: Serialize + ?Sized,
        F: FnOnce(&A) -> std::result::Result<T, E>,
        E: From<MemoError>,
    {
        let key = MemoKey::from_args(args)?;

        match self.entries.entry(key) {
            Entry::Occupied(slot) => {
                trace!(key = %slot.key(), "memo hit");
                self.stats.record_hit();
                let entry = slot.into_mut();
                if self.track_entry_hits {
                    entry.record_hit();
                }
                Ok(&entry.value)
            }
            Entry::Vacant(slot) => {
                debug!(
                    key = %slot.key(),
                    arity = slot.key().arity(),
                    "memo miss, computing"
                );
                self.stats.record_miss();
                match compute(args) {
                    Ok(value) => Ok(&slot.insert(MemoEntry::new(value)).value),
                    Err(err) => {
                        warn!(
                            key = %slot.key(),
                            "memoized computation failed, result not stored"
                        );
                        self.stats.record_failure();
                        Err(err)
                    }
                }
            }
        }
    }

    // == Get ==
    /// Returns the stored result for `args` without computing anything.
    ///
    /// Does not affect statistics.
    pub fn get<A>(&self, args: &A) -> Result<Option<&T>>
    where
        A: Serialize + ?Sized,
    {
        Ok(self.entry(args)?.map(|entry| &entry.value))
    }

    /// Returns the stored entry for `args`, including its hit counter.
    pub fn entry<A>(&self, args: &A) -> Result<Option<&MemoEntry<T>>>
    where
        A: Serialize + ?Sized,
    {
        let key = MemoKey::from_args(args)?;
        Ok(self.entries.get(&key))
    }

    /// Returns true if a result is stored for `args`.
    pub fn contains<A>(&self, args: &A) -> Result<bool>
    where
        A: Serialize + ?Sized,
    {
        Ok(self.entry(args)?.is_some())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> MemoStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq)]
    struct ComputeError(String);

    impl From<MemoError> for ComputeError {
        fn from(err: MemoError) -> Self {
            ComputeError(err.to_string())
        }
    }

    #[test]
    fn test_cache_new() {
        let cache: KeyedMemoCache<i32> = KeyedMemoCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_doubling_computed_once() {
        let mut cache = KeyedMemoCache::new();
        let calls = Cell::new(0);
        let double = |(x,): &(i32,)| {
            calls.set(calls.get() + 1);
            x * 2
        };

        assert_eq!(*cache.get_or_compute(&(3,), double).unwrap(), 6);
        assert_eq!(*cache.get_or_compute(&(3,), double).unwrap(), 6);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_argument_order_gives_separate_entries() {
        let mut cache = KeyedMemoCache::new();
        let calls = Cell::new(0);
        let sum = |args: &[i32]| {
            calls.set(calls.get() + 1);
            args.iter().sum::<i32>()
        };

        assert_eq!(*cache.get_or_compute(&[1, 2][..], sum).unwrap(), 3);
        assert_eq!(*cache.get_or_compute(&[2, 1][..], sum).unwrap(), 3);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let mut cache = KeyedMemoCache::new();
        let calls = Cell::new(0);
        let zero = |_: &(&'static str,)| {
            calls.set(calls.get() + 1);
            0
        };

        assert_eq!(*cache.get_or_compute(&("zero",), zero).unwrap(), 0);
        assert_eq!(*cache.get_or_compute(&("zero",), zero).unwrap(), 0);
        assert_eq!(calls.get(), 1);

        let mut flags = KeyedMemoCache::new();
        assert!(!*flags.get_or_compute(&(), |_| false).unwrap());
        assert!(!*flags.get_or_compute(&(), |_| true).unwrap());
    }

    #[test]
    fn test_failed_computation_is_retried() {
        let mut cache: KeyedMemoCache<u32> = KeyedMemoCache::new();
        let calls = Cell::new(0);

        let result = cache.try_get_or_compute(&(7,), |_| {
            calls.set(calls.get() + 1);
            Err(ComputeError("boom".to_string()))
        });
        assert_eq!(result, Err(ComputeError("boom".to_string())));
        assert!(cache.is_empty());

        let result = cache.try_get_or_compute(&(7,), |(n,): &(u32,)| {
            calls.set(calls.get() + 1);
            Ok::<_, ComputeError>(n + 1)
        });
        assert_eq!(result, Ok(&8));
        assert_eq!(calls.get(), 2);

        let stats = cache.stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_null_like_argument_is_not_the_empty_argument_list() {
        let mut cache = KeyedMemoCache::new();
        let calls = Cell::new(0);

        let no_args = *cache
            .get_or_compute(&(), |_| {
                calls.set(calls.get() + 1);
                "no args"
            })
            .unwrap();
        let none_arg = *cache
            .get_or_compute(&None::<i32>, |_| {
                calls.set(calls.get() + 1);
                "one None arg"
            })
            .unwrap();

        assert_eq!(no_args, "no args");
        assert_eq!(none_arg, "one None arg");
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stored_value_is_never_overwritten() {
        let mut cache = KeyedMemoCache::new();
        cache.get_or_compute(&("k",), |_| "first".to_string()).unwrap();

        let value = cache
            .get_or_compute(&("k",), |_| "second".to_string())
            .unwrap();
        assert_eq!(value, "first");
    }

    #[test]
    fn test_key_derivation_failure_skips_computation() {
        let mut cache: KeyedMemoCache<i32> = KeyedMemoCache::new();
        let mut bad = HashMap::new();
        bad.insert((1, 1), 1);

        let calls = Cell::new(0);
        let result = cache.get_or_compute(&(bad,), |_| {
            calls.set(calls.get() + 1);
            1
        });

        assert!(matches!(result, Err(MemoError::KeyDerivation(_))));
        assert_eq!(calls.get(), 0);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_key_derivation_failure_converts_into_caller_error() {
        let mut cache: KeyedMemoCache<i32> = KeyedMemoCache::new();
        let mut bad = HashMap::new();
        bad.insert(vec![0u8], 1);

        let result = cache.try_get_or_compute(&(bad,), |_| Ok::<_, ComputeError>(1));
        assert!(matches!(
            result,
            Err(ComputeError(msg)) if msg.starts_with("Key derivation failed")
        ));
    }

    #[test]
    fn test_get_and_contains_do_not_compute() {
        let mut cache = KeyedMemoCache::new();
        assert_eq!(cache.get(&(1,)).unwrap(), None);
        assert!(!cache.contains(&(1,)).unwrap());

        cache.get_or_compute(&(1,), |_| "one").unwrap();

        assert_eq!(cache.get(&(1,)).unwrap(), Some(&"one"));
        assert!(cache.contains(&(1,)).unwrap());

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_entry_hits() {
        let mut cache = KeyedMemoCache::new();
        for _ in 0..4 {
            cache.get_or_compute(&("x", 1), |_| 10).unwrap();
        }

        let entry = cache.entry(&("x", 1)).unwrap().unwrap();
        assert_eq!(entry.value, 10);
        assert_eq!(entry.hits, 3);
        assert_eq!(cache.stats().hits, 3);
    }

    #[test]
    fn test_from_config_without_entry_hits() {
        let config = MemoConfig {
            initial_capacity: 8,
            track_entry_hits: false,
        };
        let mut cache = KeyedMemoCache::from_config(&config);
        cache.get_or_compute(&(), |_| 1).unwrap();
        cache.get_or_compute(&(), |_| 1).unwrap();

        assert_eq!(cache.entry(&()).unwrap().unwrap().hits, 0);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_independent_instances() {
        let mut first = KeyedMemoCache::new();
        let mut second = KeyedMemoCache::new();

        first.get_or_compute(&(1,), |_| "first").unwrap();
        let value = second.get_or_compute(&(1,), |_| "second").unwrap();

        assert_eq!(*value, "second");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }
}

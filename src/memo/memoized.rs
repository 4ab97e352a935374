//! Memoized Function Module
//!
//! Binds one computation to its own keyed cache.

use serde::Serialize;

use crate::error::{MemoError, Result};
use crate::memo::{KeyedMemoCache, MemoStats};

// == Memoized ==
/// A computation paired with the cache of its results.
///
/// ```
/// use mini_memo::memo::Memoized;
///
/// let mut area = Memoized::new(|&(w, h): &(u32, u32)| w * h);
/// assert_eq!(*area.call(&(3, 4)).unwrap(), 12);
/// assert_eq!(area.stats().misses, 1);
/// ```
pub struct Memoized<F, T> {
    compute: F,
    cache: KeyedMemoCache<T>,
}

impl<F, T> Memoized<F, T> {
    // == Constructors ==
    /// Wraps `compute` with a fresh, empty cache.
    pub fn new(compute: F) -> Self {
        Self::with_cache(compute, KeyedMemoCache::new())
    }

    /// Wraps `compute` with a caller-provided cache.
    pub fn with_cache(compute: F, cache: KeyedMemoCache<T>) -> Self {
        Self { compute, cache }
    }

    // == Call ==
    /// Returns the result for `args`, computing it on the first call only.
    pub fn call<A>(&mut self, args: &A) -> Result<&T>
    where
        A: Serialize + ?Sized,
        F: FnMut(&A) -> T,
    {
        let compute = &mut self.compute;
        self.cache.get_or_compute(args, |args| compute(args))
    }

    // == Try Call ==
    /// Like [`Memoized::call`] for a fallible computation.
    ///
    /// Errors are returned unchanged and nothing is stored, so the next call
    /// with the same arguments runs the computation again.
    pub fn try_call<A, E>(&mut self, args: &A) -> std::result::Result<&T, E>
    where
        A: Serialize + ?Sized,
        F: FnMut(&A) -> std::result::Result<T, E>,
        E: From<MemoError>,
    {
        let compute = &mut self.compute;
        self.cache.try_get_or_compute(args, |args| compute(args))
    }

    /// Returns the underlying cache.
    pub fn cache(&self) -> &KeyedMemoCache<T> {
        &self.cache
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> MemoStats {
        self.cache.stats()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoConfig;

    #[test]
    fn test_memoized_counts_calls() {
        let mut calls = 0;
        {
            let mut square = Memoized::new(|&(x,): &(i64,)| {
                calls += 1;
                x * x
            });

            assert_eq!(*square.call(&(4,)).unwrap(), 16);
            assert_eq!(*square.call(&(4,)).unwrap(), 16);
            assert_eq!(*square.call(&(-4,)).unwrap(), 16);

            let stats = square.stats();
            assert_eq!(stats.hits, 1);
            assert_eq!(stats.misses, 2);
            assert_eq!(square.cache().len(), 2);
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_memoized_with_configured_cache() {
        let cache = KeyedMemoCache::from_config(&MemoConfig {
            initial_capacity: 4,
            track_entry_hits: true,
        });
        let mut greet =
            Memoized::with_cache(|(name,): &(&str,)| format!("hello {}", name), cache);

        assert_eq!(greet.call(&("ada",)).unwrap(), "hello ada");
        assert!(greet.cache().contains(&("ada",)).unwrap());
    }

    #[test]
    fn test_memoized_try_call_retries_after_failure() {
        let mut attempts = 0;
        let mut parse = Memoized::new(|(raw,): &(&str,)| {
            attempts += 1;
            if attempts == 1 {
                Err(MemoError::InvalidConfig("not ready".to_string()))
            } else {
                raw.parse::<u32>()
                    .map_err(|err| MemoError::InvalidConfig(err.to_string()))
            }
        });

        assert!(matches!(
            parse.try_call(&("42",)),
            Err(MemoError::InvalidConfig(_))
        ));
        assert!(!parse.cache().contains(&("42",)).unwrap());

        assert_eq!(parse.try_call(&("42",)), Ok(&42));
        assert_eq!(parse.try_call(&("42",)), Ok(&42));

        let stats = parse.stats();
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.successes(), 1);
        assert_eq!(stats.hits, 1);
    }
}

//! Gated State Module
//!
//! A state slot that ignores updates equal to the current value.

use tracing::debug;

// == Gated State ==
/// Holds a value and only replaces it when the new value differs.
///
/// Equality is whatever `PartialEq` says, which is structural for derived
/// impls, collections and `serde_json::Value`. Each accepted change bumps
/// [`GatedState::version`], so observers can tell real changes from no-op writes.
#[derive(Debug, Clone, Default)]
pub struct GatedState<T> {
    /// Current value
    value: T,
    /// Number of accepted changes
    version: u64,
}

impl<T: PartialEq> GatedState<T> {
    // == Constructor ==
    /// Creates a state holding `initial` at version 0.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            version: 0,
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the number of accepted changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    // == Set ==
    /// Replaces the value if `next` differs from it.
    ///
    /// Returns true if the value changed.
    pub fn set(&mut self, next: T) -> bool {
        if self.value == next {
            return false;
        }

        self.value = next;
        self.version += 1;
        debug!(version = self.version, "gated state changed");
        true
    }

    // == Update ==
    /// Computes the next value from the current one, then applies it like [`GatedState::set`].
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next)
    }

    /// Consumes the state, returning the current value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

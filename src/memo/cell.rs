//! Memo Cell Module
//!
//! Single-slot memoization for zero-argument computations.

use std::convert::Infallible;

use tracing::{debug, warn};

// == Memo Cell ==
/// Holds at most one computed value.
///
/// Presence is tracked by the slot itself, so a stored `0`, `false` or empty
/// string is just as present as any other value.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoCell<T> {
    /// The computed value, if any
    value: Option<T>,
    /// Number of times a computation was invoked
    computations: u64,
}

impl<T> Default for MemoCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoCell<T> {
    // == Constructor ==
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self {
            value: None,
            computations: 0,
        }
    }

    // == Get Or Compute ==
    /// Returns the stored value, computing it with `compute` on first use.
    pub fn get_or_compute<F>(&mut self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.try_get_or_compute(|| Ok::<T, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // == Try Get Or Compute ==
    /// Fallible form of [`MemoCell::get_or_compute`].
    ///
    /// An error leaves the cell empty; the next call computes again.
    pub fn try_get_or_compute<F, E>(&mut self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = match self.value.take() {
            Some(value) => value,
            None => {
                debug!("memo cell empty, computing");
                self.computations += 1;
                compute().map_err(|err| {
                    warn!("memo cell computation failed, cell left empty");
                    err
                })?
            }
        };

        Ok(self.value.insert(value))
    }

    // == Get ==
    /// Returns the stored value without computing.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns true once a value has been stored.
    pub fn is_populated(&self) -> bool {
        self.value.is_some()
    }

    /// Number of times a computation was invoked, including failed ones.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Consumes the cell, returning the stored value if any.
    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

//! Configuration Module
//!
//! Handles loading memo cache construction parameters from environment variables.

use std::env;

use crate::error::{MemoError, Result};

/// Memo cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    /// Number of entries to preallocate in a keyed cache
    pub initial_capacity: usize,
    /// Whether per-entry hit counters are maintained
    pub track_entry_hits: bool,
}

impl MemoConfig {
    /// Creates a new MemoConfig by loading values from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `MEMO_INITIAL_CAPACITY` - Preallocated entries (default: 0)
    /// - `MEMO_TRACK_ENTRY_HITS` - Per-entry hit counting (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_capacity: env::var("MEMO_INITIAL_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.initial_capacity),
            track_entry_hits: env::var("MEMO_TRACK_ENTRY_HITS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.track_entry_hits),
        }
    }

    /// Like [`MemoConfig::from_env`], but rejects values that are set and unparsable.
    pub fn try_from_env() -> Result<Self> {
        let defaults = Self::default();

        let initial_capacity = match env::var("MEMO_INITIAL_CAPACITY") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                MemoError::InvalidConfig(format!(
                    "MEMO_INITIAL_CAPACITY must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => defaults.initial_capacity,
        };

        let track_entry_hits = match env::var("MEMO_TRACK_ENTRY_HITS") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                MemoError::InvalidConfig(format!(
                    "MEMO_TRACK_ENTRY_HITS must be a boolean, got '{}'",
                    raw
                ))
            })?,
            Err(_) => defaults.track_entry_hits,
        };

        Ok(Self {
            initial_capacity,
            track_entry_hits,
        })
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            track_entry_hits: true,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

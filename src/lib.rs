//! Mini Memo - A lightweight in-process memoization library
//!
//! Provides write-once memoization keyed by argument sequences, a single-slot
//! memo cell, and an equality-gated state holder.

pub mod config;
pub mod error;
pub mod memo;
pub mod state;

pub use config::MemoConfig;
pub use error::{MemoError, Result};
pub use memo::{KeyedMemoCache, MemoCell, MemoKey, Memoized};
pub use state::GatedState;

//! Memo Module
//!
//! Provides write-once memoization keyed by structural argument keys.

mod cell;
mod entry;
mod key;
mod keyed;
mod memoized;
mod stats;


// Re-export public types
pub use cell::MemoCell;
pub use entry::MemoEntry;
pub use key::MemoKey;
pub use keyed::KeyedMemoCache;
pub use memoized::Memoized;
pub use stats::MemoStats;

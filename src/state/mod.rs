//! State Module
//!
//! Value holders whose updates are gated on structural equality.

mod gated;

pub use gated::GatedState;

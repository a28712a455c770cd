//! Roster analysis.
//!
//! Turns roster text into per-member contribution totals.

pub mod aggregator;

pub use aggregator::*;

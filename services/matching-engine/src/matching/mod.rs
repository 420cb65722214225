//! Matching logic
//!
//! Price-compatibility tests and the pairwise cross step.

pub mod crossing;
pub mod executor;

pub use executor::MatchExecutor;

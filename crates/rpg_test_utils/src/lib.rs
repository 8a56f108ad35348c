//! # RPG Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Seeded simulation fixtures and scripted actions
//! - Reproducibility harness
//! - Encounter statistics for balance checks
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balance;
pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;

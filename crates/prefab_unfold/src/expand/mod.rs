//! Expansion of composition assets into recipes and instance batches.
//!
//! The runner in [`runner`] walks a root asset recursively, keyed by a
//! single seed, and produces a [`Recipe`] of placement nodes plus a
//! [`BatchInstanceTable`] of batched transforms. [`selection`] holds the
//! weighted draw primitives, [`events`] the observation hooks.
//!
//! [`Recipe`]: recipe::Recipe
//! [`BatchInstanceTable`]: batch::BatchInstanceTable
pub mod batch;
pub mod events;
pub mod recipe;
pub mod runner;
pub mod selection;

/// Recursion depth at which expansion truncates a branch unless configured
/// otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

//! Live hierarchy storage.
//!
//! # Responsibility
//! - Hold the whole-document priority forest for one session.
//! - Provide locate/remove, cycle-guard and relocation primitives.
//!
//! # Invariants
//! - Ids are unique across all depths.
//! - A node and its subtree always move together.

pub mod arena;

pub use arena::{PriorityTree, RelocateOutcome, TreeError};

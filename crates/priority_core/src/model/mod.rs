//! Domain model for the priority hierarchy.
//!
//! # Responsibility
//! - Define the node snapshot and drop-target addressing types.
//! - Keep id generation and content normalization in one place.
//!
//! # Invariants
//! - Every node is identified by a stable `PriorityId`.
//! - Committed content is never blank.

pub mod container;
pub mod priority;

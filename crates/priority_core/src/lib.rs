//! Core domain logic for the priority manager.
//! This crate is the single source of truth for hierarchy invariants.

pub mod logging;
pub mod model;
pub mod outline;
pub mod service;
pub mod tree;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::container::{Container, ContainerTokenError};
pub use model::priority::{
    new_priority_id, normalize_content, PriorityId, PriorityNode, DEFAULT_PRIORITY_CONTENT,
    DEFAULT_SUB_PRIORITY_CONTENT,
};
pub use outline::{OutlineConfig, OutlineConfigError, OutlineError};
pub use service::priority_service::{sample_priorities, ImportError, PriorityService};
pub use tree::{PriorityTree, RelocateOutcome, TreeError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

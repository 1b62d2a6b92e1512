//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tree and outline primitives into use-case level APIs.
//! - Keep UI/drag layers decoupled from arena details.

pub mod priority_service;

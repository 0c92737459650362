//! Repository layer for session-held projects.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep storage details out of service orchestration.
//!
//! # Invariants
//! - Repositories store canonical projects only; normalization and
//!   validation happen before a write reaches them.

pub mod project_repo;

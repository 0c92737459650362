//! Canonical project data model.
//!
//! # Responsibility
//! - Define the one record shape (`Project`) used by every caller once data
//!   leaves the normalizer.
//! - Keep nested collection records and their status enums in one place.
//!
//! # Invariants
//! - Every project is identified by a stable, non-empty `ProjectId`.
//! - Nested collections are never absent; empty means "none recorded".

pub mod project;
pub mod records;
pub mod timestamp;

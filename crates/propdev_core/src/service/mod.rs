//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate normalize/merge/validate with repository calls.
//! - Give UI callers one injected source of truth per session.

pub mod project_service;

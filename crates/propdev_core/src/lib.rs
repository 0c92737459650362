//! Core project-data logic for the property-development workspace.
//! This crate is the single source of truth for the canonical project shape.

pub mod config;
pub mod logging;
pub mod merge;
pub mod migrate;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use config::{default_log_level, LoggingConfig};
pub use logging::{init_logging, logging_status};
pub use merge::{merge_project_data, ProjectUpdate};
pub use migrate::{
    migrate_many, migrate_to_project_schema, migrate_update, UNKNOWN_PARTICIPANT, UNTITLED_PROJECT,
};
pub use model::project::{Project, ProjectId, ProjectStatus, ProjectType};
pub use model::records::{
    ComplianceItem, Financing, LoanStatus, Milestone, MilestoneStatus, MonitoringReport,
    MonitoringStatus, Participant, ProjectDocument,
};
pub use repo::project_repo::{
    InMemoryProjectRepository, ProjectListQuery, ProjectRepository, RepoError, RepoResult,
};
pub use service::project_service::{
    ImportSummary, PortfolioSummary, ProjectService, RejectedRecord, ServiceError, ServiceResult,
};
pub use validate::{validate_project, ProjectValidationError, ValidationReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

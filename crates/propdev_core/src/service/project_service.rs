//! Project use-case service.
//!
//! # Responsibility
//! - Provide create/import/update/get/list/delete entry points for UI callers.
//! - Run every write through normalize (imports), merge (updates) and
//!   validation before it reaches the repository.
//! - Aggregate portfolio figures for dashboard callers.
//!
//! # Invariants
//! - Invalid projects are never persisted; the caller receives every
//!   violation at once.
//! - Service layer remains storage-agnostic.

use crate::merge::{merge_project_data, ProjectUpdate};
use crate::migrate::{migrate_many, migrate_to_project_schema};
use crate::model::project::{Project, ProjectId, ProjectStatus, ProjectType};
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository, RepoError};
use crate::validate::{validate_project, ValidationReport};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Project failed validation; carries every violation.
    Invalid(ValidationReport),
    /// Target project does not exist.
    NotFound(ProjectId),
    /// Storage-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(report) => write!(f, "invalid project: {report}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Record skipped by a batch import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    pub id: ProjectId,
    pub title: String,
    pub errors: Vec<String>,
}

/// Outcome of `import_legacy_batch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: Vec<ProjectId>,
    pub rejected: Vec<RejectedRecord>,
}

/// Portfolio-level figures across every stored project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_projects: usize,
    pub by_status: BTreeMap<ProjectStatus, usize>,
    /// Sum of `budget` over projects that have one.
    pub total_budget: f64,
    pub budgeted_projects: usize,
    pub open_compliance_items: usize,
    pub critical_reports: usize,
}

/// Use-case service wrapper over a project repository.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and stores a fresh draft project.
    pub fn create_project(
        &self,
        title: impl Into<String>,
        location: impl Into<String>,
        kind: ProjectType,
    ) -> ServiceResult<Project> {
        let project = Project::new(title, location, kind);
        self.store_new(project, "project_create")
    }

    /// Normalizes one legacy record, validates it, and stores it.
    pub fn import_legacy(&self, source: &Value) -> ServiceResult<Project> {
        let project = migrate_to_project_schema(source);
        self.store_new(project, "project_import")
    }

    /// Imports every record of a legacy collection.
    ///
    /// # Contract
    /// - Invalid or duplicate records are reported in `rejected`; they do not
    ///   abort the batch.
    /// - Other storage failures abort and are returned as errors.
    pub fn import_legacy_batch(&self, source: &Value) -> ServiceResult<ImportSummary> {
        let mut summary = ImportSummary::default();
        for project in migrate_many(source) {
            let report = validate_project(&project);
            if !report.is_valid() {
                summary.rejected.push(RejectedRecord {
                    id: project.id,
                    title: project.title,
                    errors: report.errors(),
                });
                continue;
            }
            match self.repo.create_project(&project) {
                Ok(id) => summary.imported.push(id),
                Err(RepoError::Duplicate(id)) => summary.rejected.push(RejectedRecord {
                    errors: vec![RepoError::Duplicate(id.clone()).to_string()],
                    id,
                    title: project.title,
                }),
                Err(err) => return Err(err.into()),
            }
        }

        info!(
            "event=project_import_batch module=service status=ok imported={} rejected={}",
            summary.imported.len(),
            summary.rejected.len()
        );
        Ok(summary)
    }

    /// Applies a partial update to a stored project.
    ///
    /// Returns the merged project after it has been validated and stored.
    pub fn update_project(&self, id: &str, updates: ProjectUpdate) -> ServiceResult<Project> {
        let existing = self
            .repo
            .get_project(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let merged = merge_project_data(&existing, updates);
        self.ensure_valid(&merged, "project_update")?;
        self.repo.update_project(&merged)?;

        info!(
            "event=project_update module=service status=ok project_id={} updated_at={}",
            merged.id, merged.updated_at
        );
        Ok(merged)
    }

    pub fn get_project(&self, id: &str) -> ServiceResult<Option<Project>> {
        Ok(self.repo.get_project(id)?)
    }

    /// Lists projects sorted by `updated_at DESC, id ASC`.
    pub fn list_projects(&self, query: &ProjectListQuery) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects(query)?)
    }

    pub fn delete_project(&self, id: &str) -> ServiceResult<()> {
        self.repo.delete_project(id)?;
        info!(
            "event=project_delete module=service status=ok project_id={}",
            id
        );
        Ok(())
    }

    /// Aggregates counts and budget totals across every stored project.
    pub fn portfolio_summary(&self) -> ServiceResult<PortfolioSummary> {
        let projects = self.repo.list_projects(&ProjectListQuery::default())?;
        let mut summary = PortfolioSummary {
            total_projects: projects.len(),
            ..PortfolioSummary::default()
        };
        for project in &projects {
            *summary.by_status.entry(project.status).or_insert(0) += 1;
            if let Some(budget) = project.budget {
                summary.total_budget += budget;
                summary.budgeted_projects += 1;
            }
            summary.open_compliance_items += project.open_compliance_items();
            summary.critical_reports += project.critical_reports();
        }
        Ok(summary)
    }

    fn store_new(&self, project: Project, event: &str) -> ServiceResult<Project> {
        self.ensure_valid(&project, event)?;
        self.repo.create_project(&project)?;
        info!(
            "event={} module=service status=ok project_id={} type={} status_label={}",
            event,
            project.id,
            project.kind.map_or("none", ProjectType::as_str),
            project.status.as_str()
        );
        Ok(project)
    }

    fn ensure_valid(&self, project: &Project, event: &str) -> ServiceResult<()> {
        let report = validate_project(project);
        if report.is_valid() {
            return Ok(());
        }
        warn!(
            "event={} module=service status=rejected project_id={} violations={}",
            event,
            project.id,
            report.violations().len()
        );
        Err(ServiceError::Invalid(report))
    }
}

//! Project repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the session's canonical projects.
//! - Keep storage details out of service orchestration.
//!
//! # Invariants
//! - Project ids are unique within one repository.
//! - List order is `updated_at DESC, id ASC`.
//! - Lock poisoning is reported as `RepoError::LockPoisoned`, never a panic.

use crate::model::project::{Project, ProjectId, ProjectStatus, ProjectType};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::RwLock;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(ProjectId),
    Duplicate(ProjectId),
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::Duplicate(id) => write!(f, "project already exists: {id}"),
            Self::LockPoisoned => write!(f, "project store lock poisoned"),
        }
    }
}

impl Error for RepoError {}

/// Query options for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub kind: Option<ProjectType>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for project CRUD operations.
pub trait ProjectRepository: Send + Sync {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: &str) -> RepoResult<Option<Project>>;
    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    fn delete_project(&self, id: &str) -> RepoResult<()>;
}

/// Session-scoped project store backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<BTreeMap<ProjectId, Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        let mut projects = self.projects.write().map_err(|_| RepoError::LockPoisoned)?;
        if projects.contains_key(&project.id) {
            return Err(RepoError::Duplicate(project.id.clone()));
        }
        projects.insert(project.id.clone(), project.clone());
        Ok(project.id.clone())
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        let mut projects = self.projects.write().map_err(|_| RepoError::LockPoisoned)?;
        match projects.get_mut(&project.id) {
            Some(slot) => {
                *slot = project.clone();
                Ok(())
            }
            None => Err(RepoError::NotFound(project.id.clone())),
        }
    }

    fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        let projects = self.projects.read().map_err(|_| RepoError::LockPoisoned)?;
        Ok(projects.get(id).cloned())
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|_| RepoError::LockPoisoned)?;
        let mut matched: Vec<&Project> = projects
            .values()
            .filter(|project| query.status.map_or(true, |status| project.status == status))
            .filter(|project| query.kind.map_or(true, |kind| project.kind == Some(kind)))
            .collect();

        // ISO-8601 UTC stamps with fixed precision order lexicographically.
        matched.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(matched
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .cloned()
            .collect())
    }

    fn delete_project(&self, id: &str) -> RepoResult<()> {
        let mut projects = self.projects.write().map_err(|_| RepoError::LockPoisoned)?;
        projects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }
}

//! Shallow merge of partial updates onto canonical projects.
//!
//! # Responsibility
//! - Apply a partial `ProjectUpdate` to an existing `Project`.
//! - Stamp `updated_at` on every merge.
//!
//! # Invariants
//! - Supplied collections replace the existing collection wholesale; there
//!   is no per-element patching.
//! - `id` and `created_at` are never changed by a merge.
//! - The merged `updated_at` is strictly later than the existing one.

use crate::model::project::{Project, ProjectStatus, ProjectType};
use crate::model::records::{
    ComplianceItem, Financing, Milestone, MonitoringReport, Participant, ProjectDocument,
};
use crate::model::timestamp::next_update_timestamp;
use serde::{Deserialize, Serialize};

/// Partial update for a canonical project.
///
/// `None` means "not supplied"; when deserialized from JSON both an absent
/// key and an explicit `null` map to `None`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProjectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Vec<MonitoringReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Vec<ComplianceItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<ProjectDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<Financing>,
}

impl ProjectUpdate {
    /// Returns whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Returns `existing` with every supplied field of `updates` applied.
///
/// # Contract
/// - Scalar fields: the supplied value wins, else the existing one is kept.
/// - Collection fields and `financing`: a supplied value replaces the old
///   one entirely (`Some(vec![])` clears it).
/// - `updated_at` is always refreshed, even when nothing else changed.
pub fn merge_project_data(existing: &Project, updates: ProjectUpdate) -> Project {
    let ProjectUpdate {
        title,
        description,
        location,
        kind,
        status,
        start_date,
        end_date,
        budget,
        deadline,
        ltv,
        participants,
        milestones,
        monitoring,
        compliance,
        documents,
        financing,
    } = updates;

    let mut merged = existing.clone();
    replace(&mut merged.title, title);
    replace(&mut merged.description, description);
    replace(&mut merged.location, location);
    replace(&mut merged.kind, kind.map(Some));
    replace(&mut merged.status, status);
    merged.start_date = start_date.or(merged.start_date);
    merged.end_date = end_date.or(merged.end_date);
    merged.budget = budget.or(merged.budget);
    merged.deadline = deadline.or(merged.deadline);
    merged.ltv = ltv.or(merged.ltv);
    replace(&mut merged.participants, participants);
    replace(&mut merged.milestones, milestones);
    replace(&mut merged.monitoring, monitoring);
    replace(&mut merged.compliance, compliance);
    replace(&mut merged.documents, documents);
    replace(&mut merged.financing, financing);
    merged.updated_at = next_update_timestamp(&existing.updated_at);
    merged
}

fn replace<T>(slot: &mut T, supplied: Option<T>) {
    if let Some(value) = supplied {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectUpdate;
    use crate::model::project::ProjectStatus;
    use serde_json::json;

    #[test]
    fn update_deserializes_partial_camel_case_json() {
        let update: ProjectUpdate = serde_json::from_value(json!({
            "status": "active",
            "startDate": "2026-01-05",
            "type": "strata",
            "budget": null,
            "somethingElse": 42
        }))
        .unwrap();

        assert_eq!(update.status, Some(ProjectStatus::Active));
        assert_eq!(update.start_date.as_deref(), Some("2026-01-05"));
        assert!(update.kind.is_some());
        assert_eq!(update.budget, None);
        assert!(update.participants.is_none());
    }

    #[test]
    fn empty_update_reports_empty() {
        assert!(ProjectUpdate::default().is_empty());
        let update = ProjectUpdate {
            milestones: Some(Vec::new()),
            ..ProjectUpdate::default()
        };
        assert!(!update.is_empty());
    }
}

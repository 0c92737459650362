//! Canonical project record.
//!
//! # Responsibility
//! - Define the single record shape used once data leaves the normalizer.
//! - Provide read-only progress views used by dashboard callers.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another project.
//! - All collection fields and `financing` are always present.
//! - `created_at`/`updated_at` are ISO-8601 strings; `updated_at` only moves
//!   forward through `merge_project_data`.
//!
//! # See also
//! - crate::migrate for building a `Project` from legacy input.

use crate::model::records::{
    normalize_label, ComplianceItem, Financing, Milestone, MilestoneStatus, MonitoringReport,
    MonitoringStatus, Participant, ProjectDocument,
};
use crate::model::timestamp::now_iso;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a project.
///
/// Kept as a string because legacy sources carry numeric and
/// backend-generated ids alongside UUIDs.
pub type ProjectId = String;

/// Development category of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Residential,
    Commercial,
    Strata,
    Mixed,
    Development,
}

impl ProjectType {
    /// Maps canonical and legacy labels, case-insensitively.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "residential" | "housing" | "house" | "apartment" | "apartments" => {
                Some(Self::Residential)
            }
            "commercial" | "office" | "retail" | "industrial" => Some(Self::Commercial),
            "strata" | "strata-title" | "subdivision" => Some(Self::Strata),
            "mixed" | "mixed-use" | "mixeduse" => Some(Self::Mixed),
            "development" | "land-development" | "greenfield" => Some(Self::Development),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Strata => "strata",
            Self::Mixed => "mixed",
            Self::Development => "development",
        }
    }
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "draft" | "planning" | "proposed" | "new" => Some(Self::Draft),
            "active" | "in-progress" | "inprogress" | "ongoing" | "construction" => {
                Some(Self::Active)
            }
            "paused" | "on-hold" | "onhold" | "suspended" => Some(Self::Paused),
            "completed" | "complete" | "done" | "finished" => Some(Self::Completed),
            "cancelled" | "canceled" | "abandoned" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Canonical unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Serialized as `type`. `None` only for hand-built records; the
    /// normalizer always resolves a value.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProjectType>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Loan-to-value ratio in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,
    pub participants: Vec<Participant>,
    pub milestones: Vec<Milestone>,
    pub monitoring: Vec<MonitoringReport>,
    pub compliance: Vec<ComplianceItem>,
    pub documents: Vec<ProjectDocument>,
    pub financing: Financing,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Creates an empty draft project with a generated id.
    pub fn new(title: impl Into<String>, location: impl Into<String>, kind: ProjectType) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, location, Some(kind))
    }

    /// Creates an empty draft project under a caller-provided id.
    ///
    /// Does not validate; see `validate_project`.
    pub fn with_id(
        id: impl Into<ProjectId>,
        title: impl Into<String>,
        location: impl Into<String>,
        kind: Option<ProjectType>,
    ) -> Self {
        let now = now_iso();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            location: location.into(),
            kind,
            status: ProjectStatus::Draft,
            start_date: None,
            end_date: None,
            budget: None,
            deadline: None,
            ltv: None,
            participants: Vec::new(),
            milestones: Vec::new(),
            monitoring: Vec::new(),
            compliance: Vec::new(),
            documents: Vec::new(),
            financing: Financing::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Share of milestones marked completed, in `0.0..=1.0`.
    pub fn milestone_progress(&self) -> f64 {
        ratio(
            self.milestones
                .iter()
                .filter(|milestone| milestone.status == MilestoneStatus::Completed)
                .count(),
            self.milestones.len(),
        )
    }

    /// Share of compliance items marked completed, in `0.0..=1.0`.
    pub fn compliance_progress(&self) -> f64 {
        ratio(
            self.compliance.iter().filter(|item| item.completed).count(),
            self.compliance.len(),
        )
    }

    /// Number of outstanding compliance items.
    pub fn open_compliance_items(&self) -> usize {
        self.compliance.iter().filter(|item| !item.completed).count()
    }

    /// Number of monitoring reports at `critical` severity.
    pub fn critical_reports(&self) -> usize {
        self.monitoring
            .iter()
            .filter(|report| report.status == MonitoringStatus::Critical)
            .count()
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

//! Nested records carried by a canonical `Project`.
//!
//! # Responsibility
//! - Define participant, milestone, monitoring, compliance, document and
//!   financing shapes.
//! - Provide lenient label parsing for status enums so legacy spellings map
//!   onto the canonical variants.
//!
//! # Invariants
//! - Every collection item has a non-empty `id`.
//! - Status enums serialize in kebab-case (`in-progress`, `not-started`).

use serde::{Deserialize, Serialize};

/// Person attached to a project under a free-form role tag
/// (`developer`, `consultant`, `lender`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Progress state of a milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl MilestoneStatus {
    /// Maps canonical and legacy labels, case-insensitively.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "pending" | "not-started" | "todo" | "planned" => Some(Self::Pending),
            "in-progress" | "inprogress" | "active" | "ongoing" | "started" => {
                Some(Self::InProgress)
            }
            "completed" | "complete" | "done" | "finished" => Some(Self::Completed),
            "delayed" | "late" | "overdue" | "blocked" => Some(Self::Delayed),
            _ => None,
        }
    }
}

/// Dated work item on the project timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Severity of a site monitoring report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitoringStatus {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl MonitoringStatus {
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "ok" | "good" | "green" | "on-track" | "healthy" => Some(Self::Ok),
            "warning" | "warn" | "amber" | "yellow" | "at-risk" => Some(Self::Warning),
            "critical" | "red" | "alert" | "error" | "failed" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Dated status report from site monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringReport {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub status: MonitoringStatus,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
}

/// One line of the regulatory compliance checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Issuing or approving body, e.g. a council or building authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// File attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
}

/// Lender-side state of the project loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanStatus {
    #[default]
    NotStarted,
    Pending,
    Approved,
    Rejected,
    Funded,
}

impl LoanStatus {
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "not-started" | "none" | "not-applied" => Some(Self::NotStarted),
            "pending" | "submitted" | "in-review" | "under-review" | "applied" => {
                Some(Self::Pending)
            }
            "approved" | "conditionally-approved" => Some(Self::Approved),
            "rejected" | "declined" | "denied" => Some(Self::Rejected),
            "funded" | "disbursed" | "settled" => Some(Self::Funded),
            _ => None,
        }
    }
}

/// Singleton financing record. Every field is optional so an unfinanced
/// project still carries a present, empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<f64>,
    #[serde(default)]
    pub loan_status: LoanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    /// Annual rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

/// Lowercases, trims and folds `_`/space separators into `-`.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch == '_' || ch == ' ' { '-' } else { ch })
        .collect()
}

//! Per-collection sub-mappers for the schema normalizer.
//!
//! # Invariants
//! - Mappers never fail. Unsupported input shapes map to an empty
//!   collection (or the default financing record).
//! - Collection elements that are not objects are skipped.
//! - Role-keyed participant entries without a resolvable name are dropped.

use crate::migrate::fields::{
    any_truthy, first_amount, first_date, first_text, generate_id, resolve_id, Record,
};
use crate::model::records::{
    normalize_label, ComplianceItem, Financing, LoanStatus, Milestone, MilestoneStatus,
    MonitoringReport, MonitoringStatus, Participant, ProjectDocument,
};
use log::warn;
use serde_json::Value;

/// Placeholder name for participants with no resolvable name.
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";
const DEFAULT_PARTICIPANT_ROLE: &str = "member";
const UNTITLED_MILESTONE: &str = "Untitled Milestone";
const UNTITLED_REQUIREMENT: &str = "Untitled Requirement";
const UNTITLED_DOCUMENT: &str = "Untitled Document";

const ID_FIELDS: &[&str] = &["id", "_id"];

/// Maps an ordered participant list or a role-keyed participant mapping.
pub fn map_participants(value: Option<&Value>) -> Vec<Participant> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|record| participant_from_record(record, None))
            .collect(),
        Some(Value::Object(by_role)) => by_role
            .iter()
            .filter_map(|(role, entry)| {
                let name = match entry {
                    Value::Object(record) => {
                        let participant = participant_from_record(record, Some(role));
                        if participant.name != UNKNOWN_PARTICIPANT {
                            return Some(participant);
                        }
                        participant.name
                    }
                    Value::String(name) => display_name(name),
                    _ => UNKNOWN_PARTICIPANT.to_string(),
                };
                if name == UNKNOWN_PARTICIPANT {
                    warn!(
                        "event=participant_dropped module=migrate status=skipped role={} reason=unnamed",
                        role
                    );
                    return None;
                }
                Some(Participant {
                    id: generate_id(),
                    name,
                    role: role.clone(),
                    email: None,
                    phone: None,
                    company: None,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn participant_from_record(record: &Record, role_key: Option<&String>) -> Participant {
    let role = match role_key {
        Some(key) => key.clone(),
        None => first_text(record, &["role", "type"])
            .unwrap_or_else(|| DEFAULT_PARTICIPANT_ROLE.to_string()),
    };
    Participant {
        id: resolve_id(record, &["id", "userId", "_id"]),
        name: first_text(record, &["name", "fullName", "contactName"])
            .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string()),
        role,
        email: first_text(record, &["email", "emailAddress"]),
        phone: first_text(record, &["phone", "phoneNumber", "mobile"]),
        company: first_text(record, &["company", "organization", "firm"]),
    }
}

fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNKNOWN_PARTICIPANT.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn map_milestones(value: Option<&Value>) -> Vec<Milestone> {
    records(value)
        .map(|record| {
            let status = if any_truthy(record, &["completed", "isCompleted"]) {
                MilestoneStatus::Completed
            } else {
                first_text(record, &["status", "state"])
                    .and_then(|label| MilestoneStatus::parse_lenient(&label))
                    .unwrap_or_default()
            };
            Milestone {
                id: resolve_id(record, ID_FIELDS),
                title: first_text(record, &["title", "name"])
                    .unwrap_or_else(|| UNTITLED_MILESTONE.to_string()),
                description: first_text(record, &["description", "details"]).unwrap_or_default(),
                due_date: first_date(record, &["dueDate", "date", "deadline"]),
                status,
                completed_at: first_date(record, &["completedAt", "completedDate"]),
            }
        })
        .collect()
}

pub fn map_monitoring(value: Option<&Value>) -> Vec<MonitoringReport> {
    records(value)
        .map(|record| MonitoringReport {
            id: resolve_id(record, ID_FIELDS),
            date: first_date(record, &["date", "reportDate", "createdAt"]),
            status: first_text(record, &["status", "severity", "level"])
                .and_then(|label| MonitoringStatus::parse_lenient(&label))
                .unwrap_or_default(),
            summary: first_text(record, &["summary", "notes", "description", "message"])
                .unwrap_or_default(),
            reporter: first_text(record, &["reporter", "author", "inspector"]),
        })
        .collect()
}

pub fn map_compliance(value: Option<&Value>) -> Vec<ComplianceItem> {
    records(value)
        .map(|record| {
            let completed = any_truthy(record, &["completed", "done", "isCompleted"])
                || first_text(record, &["status"]).is_some_and(|label| {
                    matches!(
                        normalize_label(&label).as_str(),
                        "completed" | "complete" | "done" | "approved"
                    )
                });
            ComplianceItem {
                id: resolve_id(record, ID_FIELDS),
                title: first_text(record, &["title", "name", "item", "requirement"])
                    .unwrap_or_else(|| UNTITLED_REQUIREMENT.to_string()),
                completed,
                authority: first_text(record, &["authority", "agency", "regulator"]),
                due_date: first_date(record, &["dueDate", "deadline"]),
                notes: first_text(record, &["notes", "comments"]),
            }
        })
        .collect()
}

pub fn map_documents(value: Option<&Value>) -> Vec<ProjectDocument> {
    records(value)
        .map(|record| ProjectDocument {
            id: resolve_id(record, ID_FIELDS),
            name: first_text(record, &["name", "title", "fileName"])
                .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string()),
            url: first_text(record, &["url", "href", "path"]),
            category: first_text(record, &["category", "type"]),
            uploaded_at: first_date(record, &["uploadedAt", "createdAt"]),
        })
        .collect()
}

pub fn map_financing(value: Option<&Value>) -> Financing {
    let Some(record) = value.and_then(Value::as_object) else {
        return Financing::default();
    };
    Financing {
        budget: first_amount(record, &["budget", "totalBudget", "amount"]),
        approved_amount: first_amount(record, &["approvedAmount", "approved", "loanAmount"]),
        loan_status: first_text(record, &["loanStatus", "status"])
            .and_then(|label| LoanStatus::parse_lenient(&label))
            .unwrap_or_default(),
        lender: first_text(record, &["lender", "lenderName", "lender.name"]),
        interest_rate: first_amount(record, &["interestRate", "rate"]),
    }
}

fn records(value: Option<&Value>) -> impl Iterator<Item = &Record> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::{map_compliance, map_financing, map_participants, records, UNKNOWN_PARTICIPANT};
    use crate::model::records::LoanStatus;
    use serde_json::json;

    #[test]
    fn records_skips_non_object_elements() {
        let value = json!([{ "id": "a" }, 3, "text", null, { "id": "b" }]);
        assert_eq!(records(Some(&value)).count(), 2);
        assert_eq!(records(Some(&json!({ "id": "a" }))).count(), 0);
        assert_eq!(records(None).count(), 0);
    }

    #[test]
    fn array_participants_keep_unnamed_entries() {
        let value = json!([{ "role": "architect" }]);
        let participants = map_participants(Some(&value));
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, UNKNOWN_PARTICIPANT);
        assert_eq!(participants[0].role, "architect");
    }

    #[test]
    fn keyed_participants_take_role_from_key_and_accept_plain_names() {
        let value = json!({
            "developer": { "name": "Harbour Holdings", "email": "ops@harbour.test" },
            "lender": "First Capital",
            "consultant": null
        });
        let participants = map_participants(Some(&value));

        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].role, "developer");
        assert_eq!(participants[0].email.as_deref(), Some("ops@harbour.test"));
        assert_eq!(participants[1].role, "lender");
        assert_eq!(participants[1].name, "First Capital");
        assert!(!participants[1].id.is_empty());
    }

    #[test]
    fn keyed_participants_keep_source_order() {
        let value = json!({
            "lender": "Zed Bank",
            "developer": { "name": "Amy" },
            "architect": "Cole Studio"
        });
        let roles: Vec<String> = map_participants(Some(&value))
            .into_iter()
            .map(|participant| participant.role)
            .collect();
        assert_eq!(roles, ["lender", "developer", "architect"]);
    }

    #[test]
    fn compliance_status_labels_are_normalized() {
        let value = json!([
            { "title": "Consent", "status": " Done " },
            { "title": "Survey", "status": "APPROVED" },
            { "title": "Fire", "status": "in_review" }
        ]);
        let completed: Vec<bool> = map_compliance(Some(&value))
            .iter()
            .map(|item| item.completed)
            .collect();
        assert_eq!(completed, [true, true, false]);
    }

    #[test]
    fn financing_reads_nested_lender_and_lenient_status() {
        let value = json!({
            "totalBudget": "$12M",
            "loanAmount": 8_000_000,
            "status": "Under Review",
            "lender": { "name": "Metro Bank" }
        });
        let financing = map_financing(Some(&value));
        assert_eq!(financing.budget, Some(12_000_000.0));
        assert_eq!(financing.approved_amount, Some(8_000_000.0));
        assert_eq!(financing.loan_status, LoanStatus::Pending);
        assert_eq!(financing.lender.as_deref(), Some("Metro Bank"));
    }

    #[test]
    fn financing_defaults_for_non_object_input() {
        assert_eq!(map_financing(Some(&json!("n/a"))), Default::default());
        assert_eq!(map_financing(None), Default::default());
    }
}

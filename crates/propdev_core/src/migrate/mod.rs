//! Schema normalizer for legacy and mock project records.
//!
//! # Responsibility
//! - Convert arbitrary JSON project-like values into canonical `Project`s.
//! - Tolerate multiple historical field layouts without per-shape branching.
//!
//! # Invariants
//! - Normalization never fails; malformed input degrades to defaults.
//! - Every output carries all collection fields and a financing record.
//! - Normalizing the JSON form of a canonical `Project` yields an equal
//!   `Project`.

mod fields;
pub mod mappers;

use crate::merge::ProjectUpdate;
use crate::migrate::fields::{
    first_amount, first_date, first_number, first_present, first_text, resolve_id, Record,
};
use crate::migrate::mappers::{
    map_compliance, map_documents, map_financing, map_milestones, map_monitoring,
    map_participants,
};
use crate::model::project::{Project, ProjectStatus, ProjectType};
use crate::model::timestamp::now_iso;
use log::{debug, warn};
use serde_json::Value;

pub use mappers::UNKNOWN_PARTICIPANT;

/// Title used when no historical title field resolves.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

const PROJECT_ID_FIELDS: &[&str] = &["id", "projectId", "_id"];
const TITLE_FIELDS: &[&str] = &["title", "name", "projectName"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "summary", "details"];
const LOCATION_FIELDS: &[&str] = &["location", "address", "site.address", "city"];
const TYPE_FIELDS: &[&str] = &["type", "projectType", "category"];
const STATUS_FIELDS: &[&str] = &["status", "projectStatus", "stage"];
const START_DATE_FIELDS: &[&str] = &["startDate", "start_date", "timeline.start"];
const END_DATE_FIELDS: &[&str] = &["endDate", "end_date", "completionDate", "timeline.end"];
const DEADLINE_FIELDS: &[&str] = &["deadline", "dueDate", "timeline.deadline"];
const BUDGET_FIELDS: &[&str] = &["budget", "totalBudget", "financials.totalBudget"];
const LTV_FIELDS: &[&str] = &["ltv", "loanToValue", "financing.ltv"];
const PARTICIPANT_FIELDS: &[&str] = &["participants", "team", "stakeholders"];
const MILESTONE_FIELDS: &[&str] = &["milestones", "phases", "timeline.milestones"];
const MONITORING_FIELDS: &[&str] = &["monitoring", "monitoringReports", "reports"];
const COMPLIANCE_FIELDS: &[&str] = &["compliance", "complianceItems", "checklist"];
const DOCUMENT_FIELDS: &[&str] = &["documents", "files"];
const FINANCING_FIELDS: &[&str] = &["financing", "financials", "loan"];
const CREATED_AT_FIELDS: &[&str] = &["createdAt", "created_at", "dateCreated"];
const UPDATED_AT_FIELDS: &[&str] = &["updatedAt", "updated_at", "lastUpdated"];

const PROJECT_FIELDS: &[&[&str]] = &[
    PROJECT_ID_FIELDS,
    TITLE_FIELDS,
    DESCRIPTION_FIELDS,
    LOCATION_FIELDS,
    TYPE_FIELDS,
    STATUS_FIELDS,
    START_DATE_FIELDS,
    END_DATE_FIELDS,
    DEADLINE_FIELDS,
    BUDGET_FIELDS,
    LTV_FIELDS,
    PARTICIPANT_FIELDS,
    MILESTONE_FIELDS,
    MONITORING_FIELDS,
    COMPLIANCE_FIELDS,
    DOCUMENT_FIELDS,
    FINANCING_FIELDS,
    CREATED_AT_FIELDS,
    UPDATED_AT_FIELDS,
];

/// Builds a canonical `Project` from any JSON value.
///
/// # Contract
/// - Each canonical field is taken from the first historical field name that
///   holds a usable value.
/// - A zero or unparseable budget reads as absent.
/// - Non-object input yields a fully defaulted project.
pub fn migrate_to_project_schema(source: &Value) -> Project {
    match source.as_object() {
        Some(record) => migrate_record(record),
        None => {
            warn!(
                "event=project_migrate module=migrate status=defaulted reason=source_not_object kind={}",
                json_kind(source)
            );
            migrate_record(&Record::new())
        }
    }
}

/// Normalizes a collection of legacy records, keeping source order.
///
/// - Arrays map element by element.
/// - Objects keyed by id map value by value; the key fills in the id when
///   the record has none. See `is_keyed_fixture` for what counts as keyed.
/// - Any other value is normalized as a single project.
pub fn migrate_many(source: &Value) -> Vec<Project> {
    match source {
        Value::Array(items) => items.iter().map(migrate_to_project_schema).collect(),
        Value::Object(keyed) if is_keyed_fixture(keyed) => keyed
            .iter()
            .filter_map(|(key, value)| value.as_object().map(|record| (key, record)))
            .map(|(key, record)| {
                if first_text(record, PROJECT_ID_FIELDS).is_some() {
                    return migrate_record(record);
                }
                let mut with_id = record.clone();
                with_id.insert("id".to_string(), Value::String(key.clone()));
                migrate_record(&with_id)
            })
            .collect(),
        other => vec![migrate_to_project_schema(other)],
    }
}

/// Reads a loosely shaped partial update into a `ProjectUpdate`.
///
/// # Contract
/// - Fields resolve through the same historical names as
///   `migrate_to_project_schema`; labels parse leniently.
/// - Supplied collections go through the collection mappers, so entries
///   without ids get generated ones.
/// - Unlike normalization, a zero amount counts as supplied, so the
///   validator still sees it.
/// - Unparseable labels and non-object input are treated as not supplied.
pub fn migrate_update(source: &Value) -> ProjectUpdate {
    let Some(record) = source.as_object() else {
        warn!(
            "event=update_migrate module=migrate status=defaulted reason=source_not_object kind={}",
            json_kind(source)
        );
        return ProjectUpdate::default();
    };

    let update = ProjectUpdate {
        title: first_text(record, TITLE_FIELDS),
        description: first_text(record, DESCRIPTION_FIELDS),
        location: first_text(record, LOCATION_FIELDS),
        kind: first_text(record, TYPE_FIELDS).and_then(|label| ProjectType::parse_lenient(&label)),
        status: first_text(record, STATUS_FIELDS)
            .and_then(|label| ProjectStatus::parse_lenient(&label)),
        start_date: first_date(record, START_DATE_FIELDS),
        end_date: first_date(record, END_DATE_FIELDS),
        budget: first_number(record, BUDGET_FIELDS),
        deadline: first_date(record, DEADLINE_FIELDS),
        ltv: first_number(record, LTV_FIELDS),
        participants: first_present(record, PARTICIPANT_FIELDS)
            .map(|value| map_participants(Some(value))),
        milestones: first_present(record, MILESTONE_FIELDS)
            .map(|value| map_milestones(Some(value))),
        monitoring: first_present(record, MONITORING_FIELDS)
            .map(|value| map_monitoring(Some(value))),
        compliance: first_present(record, COMPLIANCE_FIELDS)
            .map(|value| map_compliance(Some(value))),
        documents: first_present(record, DOCUMENT_FIELDS).map(|value| map_documents(Some(value))),
        financing: first_present(record, FINANCING_FIELDS).map(|value| map_financing(Some(value))),
    };

    debug!(
        "event=update_migrate module=migrate status=ok empty={}",
        update.is_empty()
    );
    update
}

fn migrate_record(record: &Record) -> Project {
    let created_at = first_date(record, CREATED_AT_FIELDS).unwrap_or_else(now_iso);
    let updated_at =
        first_date(record, UPDATED_AT_FIELDS).unwrap_or_else(|| created_at.clone());

    let project = Project {
        id: resolve_id(record, PROJECT_ID_FIELDS),
        title: first_text(record, TITLE_FIELDS).unwrap_or_else(|| UNTITLED_PROJECT.to_string()),
        description: first_text(record, DESCRIPTION_FIELDS).unwrap_or_default(),
        location: first_text(record, LOCATION_FIELDS).unwrap_or_default(),
        kind: Some(
            first_text(record, TYPE_FIELDS)
                .and_then(|label| ProjectType::parse_lenient(&label))
                .unwrap_or(ProjectType::Residential),
        ),
        status: first_text(record, STATUS_FIELDS)
            .and_then(|label| ProjectStatus::parse_lenient(&label))
            .unwrap_or_default(),
        start_date: first_date(record, START_DATE_FIELDS),
        end_date: first_date(record, END_DATE_FIELDS),
        budget: first_amount(record, BUDGET_FIELDS),
        deadline: first_date(record, DEADLINE_FIELDS),
        ltv: first_amount(record, LTV_FIELDS),
        participants: map_participants(first_present(record, PARTICIPANT_FIELDS)),
        milestones: map_milestones(first_present(record, MILESTONE_FIELDS)),
        monitoring: map_monitoring(first_present(record, MONITORING_FIELDS)),
        compliance: map_compliance(first_present(record, COMPLIANCE_FIELDS)),
        documents: map_documents(first_present(record, DOCUMENT_FIELDS)),
        financing: map_financing(first_present(record, FINANCING_FIELDS)),
        created_at,
        updated_at,
    };

    debug!(
        "event=project_migrate module=migrate status=ok project_id={} participants={} milestones={} monitoring={} compliance={} documents={} budget_present={}",
        project.id,
        project.participants.len(),
        project.milestones.len(),
        project.monitoring.len(),
        project.compliance.len(),
        project.documents.len(),
        project.budget.is_some()
    );

    project
}

/// An object is a fixture keyed by id when no key is a project field and
/// every value is a record carrying an id or a title.
fn is_keyed_fixture(keyed: &Record) -> bool {
    !keyed.is_empty()
        && !keyed.keys().any(|key| is_project_field(key))
        && keyed.values().all(|value| {
            value.as_object().is_some_and(|record| {
                first_text(record, PROJECT_ID_FIELDS).is_some()
                    || first_text(record, TITLE_FIELDS).is_some()
            })
        })
}

fn is_project_field(key: &str) -> bool {
    PROJECT_FIELDS
        .iter()
        .flat_map(|paths| paths.iter())
        .any(|path| path.split('.').next() == Some(key))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use propdev_core::{
    migrate_many, migrate_to_project_schema, LoanStatus, MilestoneStatus, MonitoringStatus,
    ProjectStatus, ProjectType, UNTITLED_PROJECT,
};
use serde_json::{json, Value};

fn legacy_fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/legacy_projects.json")).unwrap()
}

#[test]
fn end_to_end_minimal_legacy_record() {
    let project = migrate_to_project_schema(&json!({
        "name": "Eco Gardens",
        "budget": "35000000"
    }));

    assert_eq!(project.title, "Eco Gardens");
    assert_eq!(project.budget, Some(35_000_000.0));
    assert_eq!(project.status, ProjectStatus::Draft);
    assert!(project.participants.is_empty());
    assert!(project.milestones.is_empty());
    assert!(!project.id.is_empty());
}

#[test]
fn every_input_yields_all_collections() {
    for source in [json!({}), json!(null), json!(42), json!("text"), json!([1, 2])] {
        let project = migrate_to_project_schema(&source);
        let value = serde_json::to_value(&project).unwrap();

        for field in ["participants", "milestones", "monitoring", "compliance", "documents"] {
            assert!(value[field].is_array(), "{field} missing for {source}");
        }
        assert!(value["financing"].is_object(), "financing missing for {source}");
        assert_eq!(project.title, UNTITLED_PROJECT);
        assert_eq!(project.kind, Some(ProjectType::Residential));
    }
}

#[test]
fn title_resolution_is_first_match_wins() {
    let both = migrate_to_project_schema(&json!({ "title": "A", "name": "B" }));
    assert_eq!(both.title, "A");

    let name_only = migrate_to_project_schema(&json!({ "name": "B" }));
    assert_eq!(name_only.title, "B");

    let blank_title = migrate_to_project_schema(&json!({ "title": "", "projectName": "C" }));
    assert_eq!(blank_title.title, "C");
}

#[test]
fn unnamed_keyed_participant_is_dropped() {
    let project = migrate_to_project_schema(&json!({
        "participants": { "developer": { "name": "" } }
    }));
    assert!(project.participants.is_empty());
}

#[test]
fn zero_budget_reads_as_absent() {
    let project = migrate_to_project_schema(&json!({ "budget": 0 }));
    assert_eq!(project.budget, None);

    let fallback = migrate_to_project_schema(&json!({
        "budget": 0,
        "financials": { "totalBudget": "1250000.50" }
    }));
    assert_eq!(fallback.budget, Some(1_250_000.5));
}

#[test]
fn non_numeric_budget_string_reads_as_absent() {
    let project = migrate_to_project_schema(&json!({ "budget": "TBD" }));
    assert_eq!(project.budget, None);
}

#[test]
fn normalizing_canonical_json_is_idempotent() {
    for source in legacy_fixture().as_array().unwrap() {
        let first = migrate_to_project_schema(source);
        let second = migrate_to_project_schema(&serde_json::to_value(&first).unwrap());
        assert_eq!(second, first);
    }
}

#[test]
fn legacy_shape_with_renamed_fields_maps_every_collection() {
    let fixture = legacy_fixture();
    let project = migrate_to_project_schema(&fixture[1]);

    assert_eq!(project.id, "77");
    assert_eq!(project.title, "Eco Gardens");
    assert_eq!(project.location, "5 Fern Road, Wellington");
    assert_eq!(project.kind, Some(ProjectType::Mixed));
    assert_eq!(project.status, ProjectStatus::Draft);
    assert_eq!(project.budget, Some(35_000_000.0));

    let roles: Vec<&str> = project
        .participants
        .iter()
        .map(|participant| participant.role.as_str())
        .collect();
    assert_eq!(roles, ["developer", "lender"]);
    let developer = project
        .participants
        .iter()
        .find(|participant| participant.role == "developer")
        .unwrap();
    assert_eq!(developer.name, "Grace Liu");
    assert_eq!(developer.company.as_deref(), Some("Liu Developments"));

    assert_eq!(project.milestones.len(), 2);
    assert_eq!(project.milestones[0].title, "Design");
    assert_eq!(project.milestones[0].status, MilestoneStatus::Completed);
    assert_eq!(
        project.milestones[0].due_date.as_deref(),
        Some("2025-01-01T00:00:00.000Z")
    );
    assert_eq!(project.milestones[1].status, MilestoneStatus::Delayed);

    assert_eq!(project.compliance.len(), 2);
    assert!(project.compliance[0].completed);
    assert_eq!(project.compliance[0].authority.as_deref(), Some("WCC"));
    assert_eq!(project.compliance[1].title, "Traffic plan");
    assert!(!project.compliance[1].completed);

    assert_eq!(project.monitoring.len(), 1);
    assert_eq!(project.monitoring[0].status, MonitoringStatus::Critical);
    assert_eq!(project.monitoring[0].reporter.as_deref(), Some("J. Doe"));
    assert_eq!(project.critical_reports(), 1);
}

#[test]
fn financing_is_read_from_loan_alias() {
    let fixture = legacy_fixture();
    let project = migrate_to_project_schema(&fixture[2]);

    assert_eq!(project.status, ProjectStatus::Paused);
    assert_eq!(project.kind, Some(ProjectType::Strata));
    assert_eq!(project.location, "Hamilton");
    assert_eq!(project.budget, None);
    assert_eq!(project.financing.budget, Some(4_200_000.0));
    assert_eq!(project.financing.loan_status, LoanStatus::Pending);
    assert_eq!(project.financing.lender.as_deref(), Some("Waikato Finance"));
    assert_eq!(project.financing.interest_rate, Some(7.25));
}

#[test]
fn canonical_record_serializes_with_camel_case_fields() {
    let fixture = legacy_fixture();
    let project = migrate_to_project_schema(&fixture[0]);
    let value = serde_json::to_value(&project).unwrap();

    assert_eq!(value["type"], "residential");
    assert_eq!(value["startDate"], "2025-03-01");
    assert_eq!(value["createdAt"], "2025-01-10T09:00:00.000Z");
    assert_eq!(value["updatedAt"], "2025-06-02T10:30:00.000Z");
    assert_eq!(value["milestones"][1]["status"], "in-progress");
    assert_eq!(value["financing"]["loanStatus"], "approved");
    assert_eq!(value["financing"]["approvedAmount"], 12_000_000.0);
    assert!(value.get("endDate").is_none());
}

#[test]
fn missing_updated_at_falls_back_to_created_at() {
    let project = migrate_to_project_schema(&json!({
        "title": "Stamped",
        "createdAt": 1_700_000_000_000_i64
    }));
    assert_eq!(project.created_at, "2023-11-14T22:13:20.000Z");
    assert_eq!(project.updated_at, project.created_at);
}

#[test]
fn migrate_many_handles_arrays_keyed_fixtures_and_single_records() {
    assert_eq!(migrate_many(&legacy_fixture()).len(), 4);

    let keyed = migrate_many(&json!({
        "zeta": { "name": "Zeta" },
        "alpha": { "name": "Alpha" },
        "beta": { "id": "b-1", "name": "Beta" }
    }));
    let ids: Vec<&str> = keyed.iter().map(|project| project.id.as_str()).collect();
    assert_eq!(ids, ["zeta", "alpha", "b-1"]);

    let single = migrate_many(&json!({ "name": "Solo", "budget": 10 }));
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].title, "Solo");
}

#[test]
fn record_of_nested_sections_stays_one_project() {
    let projects = migrate_many(&json!({
        "financials": { "totalBudget": "5" },
        "site": { "address": "1 Road" }
    }));

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, UNTITLED_PROJECT);
    assert_eq!(projects[0].budget, Some(5.0));
    assert_eq!(projects[0].location, "1 Road");
}

#[test]
fn falsy_collection_candidates_fall_through() {
    let project = migrate_to_project_schema(&json!({
        "participants": false,
        "team": [{ "name": "Bo", "role": "builder" }],
        "milestones": 0,
        "phases": [{ "name": "Design" }]
    }));

    assert_eq!(project.participants.len(), 1);
    assert_eq!(project.participants[0].name, "Bo");
    assert_eq!(project.milestones.len(), 1);
}

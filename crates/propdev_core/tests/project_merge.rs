use propdev_core::model::timestamp::parse_iso;
use propdev_core::{
    merge_project_data, migrate_to_project_schema, migrate_update, validate_project, Financing, LoanStatus, Milestone,
    MilestoneStatus, Project, ProjectStatus, ProjectType, ProjectUpdate,
};
use serde_json::json;

fn project_with_three_milestones() -> Project {
    migrate_to_project_schema(&json!({
        "id": "proj-1",
        "title": "Kauri Terraces",
        "location": "Tauranga",
        "budget": 2_400_000,
        "milestones": [
            { "id": "m-1", "title": "Consent" },
            { "id": "m-2", "title": "Civil works" },
            { "id": "m-3", "title": "Handover" }
        ],
        "createdAt": "2025-01-01T00:00:00.000Z",
        "updatedAt": "2025-01-02T00:00:00.000Z"
    }))
}

#[test]
fn empty_milestone_list_replaces_existing_collection() {
    let existing = project_with_three_milestones();
    let merged = merge_project_data(
        &existing,
        ProjectUpdate {
            milestones: Some(Vec::new()),
            ..ProjectUpdate::default()
        },
    );
    assert!(merged.milestones.is_empty());
    assert_eq!(existing.milestones.len(), 3);
}

#[test]
fn empty_update_keeps_fields_and_advances_updated_at() {
    let existing = project_with_three_milestones();
    let merged = merge_project_data(&existing, ProjectUpdate::default());

    assert_eq!(merged.milestones, existing.milestones);
    assert_eq!(merged.title, existing.title);
    assert_eq!(merged.budget, existing.budget);
    assert!(parse_iso(&merged.updated_at).unwrap() > parse_iso(&existing.updated_at).unwrap());
}

#[test]
fn back_to_back_merges_strictly_increase_updated_at() {
    let fresh = Project::new("Fresh", "Nelson", ProjectType::Commercial);
    let first = merge_project_data(&fresh, ProjectUpdate::default());
    let second = merge_project_data(&first, ProjectUpdate::default());

    let stamps = [&fresh.updated_at, &first.updated_at, &second.updated_at]
        .map(|stamp| parse_iso(stamp).unwrap());
    assert!(stamps[0] < stamps[1]);
    assert!(stamps[1] < stamps[2]);
}

#[test]
fn supplied_collection_is_not_appended_or_patched() {
    let existing = project_with_three_milestones();
    let replacement = Milestone {
        id: "m-9".to_string(),
        title: "Revised programme".to_string(),
        description: String::new(),
        due_date: None,
        status: MilestoneStatus::InProgress,
        completed_at: None,
    };
    let merged = merge_project_data(
        &existing,
        ProjectUpdate {
            milestones: Some(vec![replacement.clone()]),
            ..ProjectUpdate::default()
        },
    );
    assert_eq!(merged.milestones, vec![replacement]);
}

#[test]
fn scalar_updates_win_and_identity_is_preserved() {
    let existing = project_with_three_milestones();
    let updates: ProjectUpdate = serde_json::from_value(json!({
        "title": "Kauri Terraces Stage 2",
        "status": "active",
        "type": "mixed",
        "endDate": "2027-06-30",
        "financing": { "approvedAmount": 1_800_000, "loanStatus": "approved" }
    }))
    .unwrap();

    let merged = merge_project_data(&existing, updates);

    assert_eq!(merged.id, existing.id);
    assert_eq!(merged.created_at, existing.created_at);
    assert_eq!(merged.title, "Kauri Terraces Stage 2");
    assert_eq!(merged.status, ProjectStatus::Active);
    assert_eq!(merged.kind, Some(ProjectType::Mixed));
    assert_eq!(merged.end_date.as_deref(), Some("2027-06-30"));
    assert_eq!(merged.location, "Tauranga");
    assert_eq!(merged.budget, Some(2_400_000.0));
    assert_eq!(
        merged.financing,
        Financing {
            approved_amount: Some(1_800_000.0),
            loan_status: LoanStatus::Approved,
            ..Financing::default()
        }
    );
    assert_eq!(merged.milestones.len(), 3);
}

#[test]
fn null_values_in_json_update_retain_existing_values() {
    let existing = project_with_three_milestones();
    let updates: ProjectUpdate =
        serde_json::from_value(json!({ "budget": null, "milestones": null })).unwrap();

    let merged = merge_project_data(&existing, updates);
    assert_eq!(merged.budget, Some(2_400_000.0));
    assert_eq!(merged.milestones.len(), 3);
}

#[test]
fn legacy_update_spellings_merge_cleanly() {
    let existing = project_with_three_milestones();
    let updates = migrate_update(&json!({
        "type": "Mixed Use",
        "stage": "ON_HOLD",
        "team": [{ "fullName": "Ana Ruiz", "role": "architect" }],
        "phases": [{ "name": "Design", "completed": true }]
    }));

    let merged = merge_project_data(&existing, updates);

    assert_eq!(merged.kind, Some(ProjectType::Mixed));
    assert_eq!(merged.status, ProjectStatus::Paused);
    assert_eq!(merged.participants.len(), 1);
    assert_eq!(merged.participants[0].name, "Ana Ruiz");
    assert!(!merged.participants[0].id.is_empty());
    assert_eq!(merged.milestones.len(), 1);
    assert_eq!(merged.milestones[0].status, MilestoneStatus::Completed);
    assert_eq!(merged.title, existing.title);
    assert_eq!(merged.budget, existing.budget);
}

#[test]
fn legacy_update_leaves_unsupplied_fields_out() {
    let updates = migrate_update(&json!({ "type": "spaceport", "budget": null }));
    assert!(updates.is_empty());
    assert!(migrate_update(&json!("not an object")).is_empty());
}

#[test]
fn legacy_update_keeps_explicit_zero_budget() {
    let updates = migrate_update(&json!({ "budget": 0, "milestones": [] }));
    assert_eq!(updates.budget, Some(0.0));
    assert_eq!(updates.milestones, Some(Vec::new()));

    let merged = merge_project_data(&project_with_three_milestones(), updates);
    assert!(merged.milestones.is_empty());
    assert!(!validate_project(&merged).is_valid());
}

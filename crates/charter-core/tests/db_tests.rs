use charter_core::{
    BudgetCategory, ClientFilter, Database, DraftError, DraftFilter, DraftStatus, EmployeeFilter,
    ProjectDraft, Role, WizardStep,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn sample_draft(name: &str) -> ProjectDraft {
    let mut draft = ProjectDraft::new();
    draft.general.name = name.to_string();
    draft.general.currency = Some("EUR".to_string());
    let phase = draft.wbs.add_root("Phase 1");
    draft.wbs.add_child(phase, "Task A").unwrap();
    draft.team.add(3, Role::ProjectManager);
    draft
        .budget
        .add_line(BudgetCategory::Labor, "Build", 500.0)
        .unwrap();
    draft
}

#[test]
fn test_database_initialization_is_repeatable() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    Database::new(temp_file.path()).expect("first open");
    let db = Database::new(temp_file.path()).expect("second open");

    // Seeded currencies are not duplicated by re-running the schema
    assert_eq!(db.list_currencies().unwrap().len(), 5);
}

#[test]
fn test_save_draft_roundtrip() {
    let (_temp_file, mut db) = create_test_db();

    let saved = db.save_draft(&sample_draft("Apollo")).unwrap();
    let id = saved.id.expect("saved draft should have an id");
    assert_eq!(saved.status, DraftStatus::Draft);
    assert!(saved.created_at.is_some());
    assert!(saved.submitted_at.is_none());

    let loaded = db.get_draft(id).unwrap().expect("draft should exist");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.wbs.len(), 2);
    assert_eq!(loaded.team.len(), 1);
    assert_eq!(loaded.budget.total(), 500.0);
}

#[test]
fn test_save_twice_updates_same_row() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.save_draft(&sample_draft("Apollo")).unwrap();
    let mut edited = first.clone();
    edited.general.name = "Apollo II".to_string();
    let second = db.save_draft(&edited).unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.general.name, "Apollo II");
    assert_eq!(db.list_drafts(&DraftFilter::default()).unwrap().len(), 1);
}

#[test]
fn test_save_with_unknown_id_inserts_it() {
    let (_temp_file, mut db) = create_test_db();

    let mut draft = sample_draft("Imported");
    draft.id = Some(42);
    let saved = db.save_draft(&draft).unwrap();
    assert_eq!(saved.id, Some(42));
}

#[test]
fn test_wbs_ids_survive_storage() {
    let (_temp_file, mut db) = create_test_db();

    let mut draft = sample_draft("Apollo");
    let removed = draft.wbs.add_root("Scratch");
    draft.wbs.remove(removed);
    let mut saved = db.save_draft(&draft).unwrap();

    // Ids are never reused, even after a storage roundtrip
    let next = saved.wbs.add_root("Phase 2");
    assert!(next > removed);
}

#[test]
fn test_deep_wbs_survives_storage() {
    let (_temp_file, mut db) = create_test_db();

    let mut draft = sample_draft("Deep");
    let mut parent = draft.wbs.add_root("Level 0");
    for level in 1..1500 {
        parent = draft.wbs.add_child(parent, format!("Level {level}")).unwrap();
    }
    draft.wbs.set_estimate_hours(parent, 4.0).unwrap();

    let saved = db.save_draft(&draft).unwrap();
    let id = saved.id.unwrap();
    let loaded = db.get_draft(id).unwrap().expect("deep draft should load");
    assert_eq!(loaded.wbs, draft.wbs);
    assert_eq!(loaded.wbs.len(), 1502);
    assert_eq!(loaded.wbs.total_hours(), 4.0);

    let listed = db.list_drafts(&DraftFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].wbs_nodes, 1502);
}

#[test]
fn test_list_orders_by_latest_save() {
    let (_temp_file, mut db) = create_test_db();

    let apollo = db.save_draft(&sample_draft("Apollo")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    db.save_draft(&sample_draft("Gemini")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    db.save_draft(&apollo).unwrap();

    let names: Vec<String> = db
        .list_drafts(&DraftFilter::default())
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Apollo", "Gemini"]);
}

#[test]
fn test_submit_draft_is_idempotent() {
    let (_temp_file, mut db) = create_test_db();

    let saved = db.save_draft(&sample_draft("Apollo")).unwrap();
    let first = db.submit_draft(&saved).unwrap();
    assert_eq!(first.status, DraftStatus::Submitted);
    let submitted_at = first.submitted_at.expect("submission time should be set");

    let second = db.submit_draft(&first).unwrap();
    assert_eq!(second.submitted_at, Some(submitted_at));
    assert_eq!(second.status, DraftStatus::Submitted);
}

#[test]
fn test_submitted_row_is_not_overwritten() {
    let (_temp_file, mut db) = create_test_db();

    let submitted = db.submit_draft(&sample_draft("Apollo")).unwrap();
    let mut tampered = submitted.clone();
    tampered.general.name = "Changed".to_string();
    tampered.status = DraftStatus::Draft;

    let stored = db.save_draft(&tampered).unwrap();
    assert_eq!(stored.general.name, "Apollo");
    assert_eq!(stored.status, DraftStatus::Submitted);
}

#[test]
fn test_list_drafts_filters() {
    let (_temp_file, mut db) = create_test_db();

    db.save_draft(&sample_draft("Apollo")).unwrap();
    db.save_draft(&sample_draft("Gemini")).unwrap();
    db.submit_draft(&sample_draft("Mercury")).unwrap();

    let all = db.list_drafts(&DraftFilter::default()).unwrap();
    assert_eq!(all.len(), 3);

    let submitted = db
        .list_drafts(&DraftFilter::with_status(DraftStatus::Submitted))
        .unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].name, "Mercury");

    let named = db
        .list_drafts(&DraftFilter {
            name_contains: Some("gem".to_string()),
            status: None,
        })
        .unwrap();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].name, "Gemini");
    assert_eq!(named[0].wbs_nodes, 2);
    assert_eq!(named[0].total_budget, 500.0);
}

#[test]
fn test_wizard_step_persistence() {
    let (_temp_file, mut db) = create_test_db();

    let saved = db.save_draft(&sample_draft("Apollo")).unwrap();
    let id = saved.id.unwrap();

    let (_, step) = db.get_session(id).unwrap().unwrap();
    assert_eq!(step, WizardStep::General);

    db.set_wizard_step(id, WizardStep::Team).unwrap();
    let (_, step) = db.get_session(id).unwrap().unwrap();
    assert_eq!(step, WizardStep::Team);

    let result = db.set_wizard_step(999, WizardStep::Team);
    assert!(matches!(result, Err(DraftError::DraftNotFound { id: 999 })));
}

#[test]
fn test_get_missing_draft() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_draft(404).unwrap().is_none());
}

#[test]
fn test_client_directory() {
    let (_temp_file, mut db) = create_test_db();

    db.add_client("Acme Corp", Some("ACM")).unwrap();
    db.add_client("Globex", None).unwrap();
    assert!(db.add_client("   ", None).is_err());

    let all = db.list_clients(&ClientFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Acme Corp");

    let by_code = db
        .list_clients(&ClientFilter {
            search: Some("acm".to_string()),
        })
        .unwrap();
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].code.as_deref(), Some("ACM"));
}

#[test]
fn test_currency_registration() {
    let (_temp_file, mut db) = create_test_db();

    assert!(db.add_currency("sek", "Swedish Krona").unwrap());
    assert!(!db.add_currency("EUR", "Renamed Euro").unwrap());
    assert!(matches!(
        db.add_currency("EU", "Broken"),
        Err(DraftError::InvalidArgument { .. })
    ));

    let currencies = db.list_currencies().unwrap();
    assert_eq!(currencies.len(), 6);
    let eur = currencies.iter().find(|c| c.code == "EUR").unwrap();
    assert_eq!(eur.name, "Euro");
    assert!(currencies.iter().any(|c| c.code == "SEK"));
}

#[test]
fn test_employee_directory() {
    let (_temp_file, mut db) = create_test_db();

    let ada = db
        .add_employee("Ada Lovelace", "ada@example.com", Some("Analyst"))
        .unwrap();
    db.add_employee("Alan Turing", "alan@example.com", None)
        .unwrap();
    db.set_employee_active(ada.id, false).unwrap();

    let everyone = db.search_employees(&EmployeeFilter::new("a", false)).unwrap();
    assert_eq!(everyone.len(), 2);

    let active = db.search_employees(&EmployeeFilter::new("", true)).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Alan Turing");

    let by_email = db
        .search_employees(&EmployeeFilter::new("ada@", false))
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert!(!by_email[0].active);

    assert!(db.set_employee_active(999, true).is_err());
}

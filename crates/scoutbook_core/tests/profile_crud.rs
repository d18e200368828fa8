use scoutbook_core::db::open_db_in_memory;
use scoutbook_core::{
    demo_profiles, NewProfile, ProfileNotesUpdate, ProfileRepository, ProfileService, RepoError,
    ServiceError, SqliteProfileRepository, Store,
};

fn jane() -> NewProfile {
    NewProfile::new("Jane Doe", "PM", "https://x/in/jane", "PM", "SF")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProfileRepository::new(&conn);

    let mut input = jane();
    input.about = Some("Builds things".to_string());
    let id = repo.create_profile(&input).unwrap();

    let loaded = repo.get_profile(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Jane Doe");
    assert_eq!(loaded.url, "https://x/in/jane");
    assert_eq!(loaded.about.as_deref(), Some("Builds things"));
    assert_eq!(loaded.notes, None);

    let by_url = repo.get_profile_by_url("https://x/in/jane").unwrap();
    assert_eq!(by_url, Some(loaded));
}

#[test]
fn created_profile_is_listed_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    service
        .create_profile(&NewProfile::new("A", "h", "https://x/in/a", "t", "l"))
        .unwrap();
    let created = service.create_profile(&jane()).unwrap();

    let listed = service.list_profiles().unwrap();
    let matching: Vec<_> = listed
        .iter()
        .filter(|profile| profile.url == "https://x/in/jane")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, created.id);
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    for suffix in ["c", "a", "b"] {
        service
            .create_profile(&NewProfile::new(
                suffix,
                "h",
                format!("https://x/in/{suffix}"),
                "t",
                "l",
            ))
            .unwrap();
    }

    let ids: Vec<_> = service
        .list_profiles()
        .unwrap()
        .into_iter()
        .map(|profile| profile.id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 3);
}

#[test]
fn duplicate_url_conflicts_and_adds_no_row() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    service.create_profile(&jane()).unwrap();
    let mut duplicate = jane();
    duplicate.name = "Someone Else".to_string();
    let err = service.create_profile(&duplicate).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Conflict { entity: "profile", field: "url", .. }
    ));
    assert_eq!(service.list_profiles().unwrap().len(), 1);
}

#[test]
fn blank_required_field_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProfileRepository::new(&conn);

    let mut input = jane();
    input.headline = "  ".to_string();
    let err = repo.create_profile(&input).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    assert_eq!(service.get_profile(42).unwrap(), None);
    assert!(matches!(
        service.delete_profile(42).unwrap_err(),
        ServiceError::NotFound { entity: "profile", id: 42 }
    ));
    assert!(matches!(
        service
            .update_profile_notes(42, &ProfileNotesUpdate::set("x"))
            .unwrap_err(),
        ServiceError::NotFound { id: 42, .. }
    ));
}

#[test]
fn notes_update_changes_only_notes() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    let mut input = jane();
    input.profile_pic = Some("https://img/jane.png".to_string());
    let before = service.create_profile(&input).unwrap();

    let after = service
        .update_profile_notes(before.id, &ProfileNotesUpdate::set("met at expo"))
        .unwrap();
    assert_eq!(after.notes.as_deref(), Some("met at expo"));

    let mut expected = before.clone();
    expected.notes = Some("met at expo".to_string());
    assert_eq!(after, expected);

    let cleared = service
        .update_profile_notes(before.id, &ProfileNotesUpdate::clear())
        .unwrap();
    assert_eq!(cleared, before);
}

#[test]
fn empty_notes_update_returns_current_row() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    let created = service.create_profile(&jane()).unwrap();
    let unchanged = service
        .update_profile_notes(created.id, &ProfileNotesUpdate::default())
        .unwrap();
    assert_eq!(unchanged, created);
}

#[test]
fn delete_returns_prior_state_and_removes_everywhere() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    let created = service.create_profile(&jane()).unwrap();
    let deleted = service.delete_profile(created.id).unwrap();
    assert_eq!(deleted, created);

    assert_eq!(service.get_profile(created.id).unwrap(), None);
    assert_eq!(
        service.get_profile_by_url("https://x/in/jane").unwrap(),
        None
    );
    assert!(service.list_profiles().unwrap().is_empty());
    assert!(matches!(
        service.delete_profile(created.id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn deleted_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    let first = service.create_profile(&jane()).unwrap();
    service.delete_profile(first.id).unwrap();
    let second = service.create_profile(&jane()).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.get_profile(first.id).unwrap(), None);
}

#[test]
fn seeding_twice_inserts_each_demo_profile_once() {
    let conn = open_db_in_memory().unwrap();
    let service = ProfileService::new(SqliteProfileRepository::new(&conn));

    let expected = demo_profiles().len();
    assert_eq!(service.seed_demo_profiles().unwrap(), expected);
    assert_eq!(service.seed_demo_profiles().unwrap(), 0);
    assert_eq!(service.list_profiles().unwrap().len(), expected);

    assert_eq!(service.truncate_profiles().unwrap(), expected);
    assert!(service.list_profiles().unwrap().is_empty());
}

#[test]
fn conflicting_unit_of_work_leaves_store_unchanged() {
    let store = Store::open_in_memory().unwrap();

    store
        .unit_of_work(|conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).create_profile(&jane())
        })
        .unwrap();

    let err = store
        .unit_of_work(|conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).create_profile(&jane())
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));

    let count = store
        .unit_of_work(|conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).list_profiles()
        })
        .unwrap()
        .len();
    assert_eq!(count, 1);
}

use projectflip_core::db::migrations::latest_version;
use projectflip_core::db::{open_db, open_db_in_memory};
use projectflip_core::{
    EntityId, EntityStore, NewContact, NewProject, RepoError, SnapshotRepository,
    SqliteSnapshotRepository, StoreConfig, StoreState,
};
use rusqlite::Connection;

fn busy_store() -> EntityStore {
    let mut store = EntityStore::new();
    store.add_project(NewProject::new("Harbor Lofts", "Waterfront lofts", "/h.jpg"));
    store.delete_project("1");
    store.delete_client("2");
    store.add_contact(NewContact::new("Ada", "ada@x.com", "555", "NYC"));
    store.add_subscriber("a@b.com");
    store.add_subscriber("a@b.com");
    store
}

#[test]
fn empty_database_loads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    assert!(repo.load_state().unwrap().is_none());
    assert!(repo.last_saved_at().unwrap().is_none());
}

#[test]
fn saved_state_roundtrips_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let state = busy_store().state();

    repo.save_state(&state).unwrap();
    let loaded = repo.load_state().unwrap().unwrap();

    assert_eq!(loaded, state);
    assert_eq!(loaded.retired_ids.projects, vec![EntityId::new("1")]);
    assert_eq!(loaded.retired_ids.clients, vec![EntityId::new("2")]);
    assert_eq!(loaded.projects[0].name, "Eco Office Park");
    assert_eq!(loaded.projects[2].name, "Harbor Lofts");
    assert!(repo.last_saved_at().unwrap().is_some());
}

#[test]
fn saving_replaces_previous_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    repo.save_state(&busy_store().state()).unwrap();
    repo.save_state(&StoreState::seeded()).unwrap();

    let loaded = repo.load_state().unwrap().unwrap();
    assert_eq!(loaded, StoreState::seeded());
    assert!(loaded.subscribers.is_empty());
}

#[test]
fn saving_empty_state_still_loads_as_some() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    repo.save_state(&StoreState::default()).unwrap();

    assert_eq!(repo.load_state().unwrap(), Some(StoreState::default()));
}

#[test]
fn restored_store_continues_from_saved_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.db");
    let original = busy_store();

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        repo.save_state(&original.state()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let state = repo.load_state().unwrap().unwrap();
    let mut restored = EntityStore::from_state(state, StoreConfig::default()).unwrap();

    assert_eq!(restored.state(), original.state());
    let id = restored.add_subscriber("late@b.com");
    assert!(original.subscribers().iter().all(|s| s.id != id));
    assert_eq!(restored.subscribers().len(), 3);
}

#[test]
fn deleted_ids_stay_reserved_after_restore() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = EntityStore::new();
    let deleted = store.add_project(NewProject::new("Short Lived", "", ""));
    store.delete_project(deleted.as_str());
    repo.save_state(&store.state()).unwrap();

    let state = repo.load_state().unwrap().unwrap();
    assert_eq!(state.retired_ids.projects, vec![deleted.clone()]);
    let mut restored = EntityStore::from_state(state, StoreConfig::default()).unwrap();

    assert!(restored.state().retired_ids.projects.contains(&deleted));
    for _ in 0..50 {
        let id = restored.add_project(NewProject::new("Next", "", ""));
        assert_ne!(id, deleted);
    }
}

#[test]
fn unknown_retired_collection_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    repo.save_state(&StoreState::default()).unwrap();

    conn.execute(
        "INSERT INTO retired_ids (collection, id) VALUES ('invoices', 'abc123');",
        [],
    )
    .unwrap();

    let err = repo.load_state().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected error: {err}");
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSnapshotRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn malformed_rows_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    repo.save_state(&StoreState::default()).unwrap();

    conn.execute(
        "INSERT INTO subscribers (id, position, email, subscribed_at) VALUES ('abc', 0, 'a@b.com', -5);",
        [],
    )
    .unwrap();

    let err = repo.load_state().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected error: {err}");
}

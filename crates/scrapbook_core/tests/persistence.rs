use scrapbook_core::db::{open_db, open_db_in_memory};
use scrapbook_core::{
    Collection, EntryKey, ImageFile, MemorySnapshotRepository, ScrapbookStore, SnapshotRepository,
    SqliteSnapshotRepository, Theme,
};

#[test]
fn every_mutation_is_mirrored_to_the_repository_before_returning() {
    let repo = MemorySnapshotRepository::new();
    let mut store = ScrapbookStore::open(&repo).unwrap();

    let id = store.add_note("mirror me").unwrap().unwrap();
    assert!(read_entry(&repo, EntryKey::Notes).contains("mirror me"));

    store.edit_note(id, "edited").unwrap();
    assert!(read_entry(&repo, EntryKey::Notes).contains("edited"));

    store.set_theme(Theme::Dark).unwrap();
    assert_eq!(read_entry(&repo, EntryKey::Theme), "dark");

    store.delete_item(Collection::Notes, id).unwrap();
    assert_eq!(read_entry(&repo, EntryKey::Notes), "[]");
}

fn read_entry(repo: &MemorySnapshotRepository, key: EntryKey) -> String {
    repo.read_entry(key).unwrap().unwrap_or_default()
}

#[test]
fn state_survives_a_reload_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scrapbook.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = ScrapbookStore::open(SqliteSnapshotRepository::new(&conn)).unwrap();
        store.add_note("durable").unwrap();
        store
            .add_photo(&ImageFile::new("image/png", vec![9, 9]), None)
            .unwrap();
        store
            .add_timeline_entry("2021-02-03", "Moved in", None)
            .unwrap();
        store.set_theme(Theme::Dark).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = ScrapbookStore::open(SqliteSnapshotRepository::new(&conn)).unwrap();

    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].text, "durable");
    assert_eq!(store.photos().len(), 1);
    assert_eq!(store.timeline().len(), 1);
    assert_eq!(store.theme(), Theme::Dark);
}

#[test]
fn fresh_repository_hydrates_to_empty_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = ScrapbookStore::open(SqliteSnapshotRepository::new(&conn)).unwrap();

    assert!(store.notes().is_empty());
    assert!(store.photos().is_empty());
    assert!(store.timeline().is_empty());
    assert_eq!(store.theme(), Theme::Romantic);
}

#[test]
fn corrupt_photos_entry_recovers_to_an_empty_collection() {
    let repo = MemorySnapshotRepository::new();
    repo.seed(EntryKey::Photos, "{{{ not json");
    repo.seed(EntryKey::Notes, r#"[{"id":1,"text":"intact"}]"#);

    let store = ScrapbookStore::open(repo).unwrap();

    assert!(store.photos().is_empty());
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].text, "intact");
}

#[test]
fn unknown_theme_entry_recovers_to_the_default() {
    let repo = MemorySnapshotRepository::new();
    repo.seed(EntryKey::Theme, "neon");

    let store = ScrapbookStore::open(repo).unwrap();
    assert_eq!(store.theme(), Theme::Romantic);
}

#[test]
fn theme_is_persisted_as_its_bare_name() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut store = ScrapbookStore::open(SqliteSnapshotRepository::new(&conn)).unwrap();
        store.set_theme(Theme::Light).unwrap();
    }

    let repo = SqliteSnapshotRepository::new(&conn);
    assert_eq!(
        repo.read_entry(EntryKey::Theme).unwrap().as_deref(),
        Some("light")
    );
}

#[test]
fn collections_are_persisted_as_json_arrays() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut store = ScrapbookStore::open(SqliteSnapshotRepository::new(&conn)).unwrap();
        store.add_note("wire shape").unwrap();
    }

    let repo = SqliteSnapshotRepository::new(&conn);
    let raw = repo.read_entry(EntryKey::Notes).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["text"], "wire shape");
}

#[test]
fn sqlite_repository_overwrites_entries_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);

    repo.write_entry(EntryKey::Notes, "[]").unwrap();
    repo.write_entry(EntryKey::Notes, r#"[{"id":1,"text":"x"}]"#)
        .unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM snapshot_entries WHERE key = 'notes';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

use todolist::application::todo_store::TodoStore;
use todolist::domain::slot::StateSlot;
use todolist::domain::todo::{StatusFilter, TaskId};
use todolist::infrastructure::file_slot::FileSlot;
use todolist::view::projector::project;

fn slot_in(dir: &tempfile::TempDir) -> FileSlot {
    FileSlot::open(dir.path().join("todos.json")).unwrap()
}

#[test]
fn collection_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = TodoStore::open(slot_in(&dir)).unwrap();
    store.add("Buy milk", None).unwrap();
    let billed = store.add("Pay bill", Some("2025-02-01")).unwrap();
    store.add("Walk dog", Some("")).unwrap();
    store.toggle_complete(billed.id).unwrap();
    let before = store.load_all().to_vec();
    drop(store);

    let reopened = TodoStore::open(slot_in(&dir)).unwrap();
    assert_eq!(reopened.load_all(), &before[..]);
}

#[test]
fn restored_ids_stay_unique_after_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = TodoStore::open(slot_in(&dir)).unwrap();
    store.add("first", None).unwrap();
    let second = store.add("second", None).unwrap();
    drop(store);

    let mut reopened = TodoStore::open(slot_in(&dir)).unwrap();
    let third = reopened.add("third", None).unwrap();
    assert!(third.id > second.id);
    let mut ids: Vec<TaskId> = reopened.load_all().iter().map(|t| t.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn missing_file_restores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = TodoStore::open(slot_in(&dir)).unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn undecodable_file_restores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, "not json at all {{{").unwrap();

    let store = TodoStore::open(FileSlot::open(&path).unwrap()).unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn structurally_incompatible_file_restores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, r#"{"version": 2, "items": []}"#).unwrap();

    let store = TodoStore::open(FileSlot::open(&path).unwrap()).unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn date_absent_and_empty_both_decode_as_no_due_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(
        &path,
        r#"[{"id":1,"text":"a","completed":false},{"id":2,"text":"b","date":"","completed":true},{"id":3,"text":"c","date":"  ","completed":false},{"id":4,"text":"d","date":"2025-03-01","completed":false}]"#,
    )
    .unwrap();

    let store = TodoStore::open(FileSlot::open(&path).unwrap()).unwrap();
    let tasks = store.load_all();
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0].date, None);
    assert_eq!(tasks[1].date, None);
    assert_eq!(tasks[2].date, None);
    assert_eq!(tasks[3].date.as_deref(), Some("2025-03-01"));
}

#[test]
fn persisted_form_is_one_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let mut slot = FileSlot::open(&path).unwrap();

    let mut store = TodoStore::open(slot_in(&dir)).unwrap();
    store.add("Buy milk", Some("2025-01-31")).unwrap();
    drop(store);

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "Buy milk");
    assert_eq!(items[0]["date"], "2025-01-31");
    assert_eq!(items[0]["completed"], false);

    // persist overwrites the slot wholesale
    slot.persist(&[]).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn projector_sees_restored_collection() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = TodoStore::open(slot_in(&dir)).unwrap();
    store.add("Buy milk", None).unwrap();
    let billed = store.add("Pay bill", None).unwrap();
    store.toggle_complete(billed.id).unwrap();
    drop(store);

    let reopened = TodoStore::open(slot_in(&dir)).unwrap();
    let active = project(reopened.load_all(), StatusFilter::Active, "");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text, "Buy milk");
    let found = project(reopened.load_all(), StatusFilter::All, "bill");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text, "Pay bill");
}

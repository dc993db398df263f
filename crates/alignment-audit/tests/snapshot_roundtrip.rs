//! Integration specifications for file-backed session persistence.

use alignment_audit::assessment::{JsonFileStore, ResponseStore, SnapshotStore};
use alignment_audit::{MetaField, QuestionBank};
use std::fs;

#[test]
fn state_survives_a_process_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit-state.json");
    let bank = QuestionBank::standard();

    {
        let mut store = ResponseStore::load_or_init(JsonFileStore::new(&path));
        store.set_meta_field(MetaField::CompanyName, "Acme Corp".to_string());
        store.set_meta_field(MetaField::Email, "ceo@acme.example".to_string());
        store.set_answer(&bank, "q1", 5).expect("known question");
        store.set_answer(&bank, "q33", 2).expect("known question");
    }

    let restored = ResponseStore::load_or_init(JsonFileStore::new(&path));
    assert_eq!(restored.state().meta.company_name, "Acme Corp");
    assert_eq!(restored.state().meta.email, "ceo@acme.example");
    assert_eq!(restored.state().answers.get("q1"), Some(&5));
    assert_eq!(restored.state().answers.get("q33"), Some(&2));
}

#[test]
fn snapshot_file_is_plain_json_with_camel_case_meta() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit-state.json");
    let bank = QuestionBank::standard();

    let mut store = ResponseStore::load_or_init(JsonFileStore::new(&path));
    store.set_meta_field(MetaField::RespondentRole, "COO".to_string());
    store.set_answer(&bank, "q9", 3).expect("known question");

    let raw = fs::read_to_string(&path).expect("snapshot written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("snapshot is json");
    assert_eq!(value["meta"]["respondentRole"], "COO");
    assert_eq!(value["answers"]["q9"], 3);
}

#[test]
fn corrupt_snapshot_falls_open_to_a_fresh_session() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit-state.json");
    fs::write(&path, "{\"meta\": 7, not even json").expect("write corrupt blob");

    let store = ResponseStore::load_or_init(JsonFileStore::new(&path));
    assert!(store.state().answers.is_empty());
    assert!(store.state().meta.company_name.is_empty());
    assert!(!store.state().meta.date.is_empty(), "fresh state is dated");
}

#[test]
fn missing_file_reads_as_no_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = JsonFileStore::new(dir.path().join("never-written.json"));
    assert!(file.load().expect("missing file is not an error").is_none());
    file.clear().expect("clearing a missing file is a no-op");
}

#[test]
fn reset_removes_the_snapshot_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit-state.json");
    let bank = QuestionBank::standard();

    let mut store = ResponseStore::load_or_init(JsonFileStore::new(&path));
    store.set_answer(&bank, "q1", 4).expect("known question");
    assert!(path.exists());

    store.reset();
    assert!(!path.exists());

    let restored = ResponseStore::load_or_init(JsonFileStore::new(&path));
    assert!(restored.state().answers.is_empty());
}

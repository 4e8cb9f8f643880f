use std::fs;

use tempfile::TempDir;

use super::*;

fn store_in(dir: &TempDir) -> CommandStore {
    CommandStore::open(dir.path().join("commands.json"))
}

fn seeded_store(dir: &TempDir, commands: &[Command]) -> CommandStore {
    let path = dir.path().join("commands.json");
    let encoded = serde_json::to_string_pretty(commands).expect("encode fixture");
    fs::write(&path, encoded).expect("write fixture");
    CommandStore::open(path)
}

fn command(id: &str, name: &str) -> Command {
    Command {
        id: id.to_string(),
        name: name.to_string(),
        command: format!("{}-body", name.to_lowercase()),
        description: None,
    }
}

#[test]
fn missing_file_yields_default_set() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let names: Vec<_> = store.commands().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["RefactorCode", "CheckSpelling", "OptimizePerformance"]
    );
}

#[test]
fn malformed_file_yields_default_set() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("commands.json");
    fs::write(&path, "{ not json ]").expect("write fixture");
    let store = CommandStore::open(path);
    assert_eq!(store.len(), 3);
}

#[test]
fn append_persists_the_whole_set() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = seeded_store(&dir, &[command("1", "First")]);
    store.append(command("2", "Second"));

    let reopened = store_in(&dir);
    let names: Vec<_> = reopened.commands().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn delete_removes_only_the_given_id() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = seeded_store(
        &dir,
        &[command("1", "First"), command("2", "Second"), command("3", "Third")],
    );

    assert!(store.delete("2"));

    let ids: Vec<_> = store.commands().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(store.commands()[0], command("1", "First"));
    assert_eq!(store.commands()[1], command("3", "Third"));
}

#[test]
fn delete_reloads_from_disk() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = seeded_store(&dir, &[command("1", "First"), command("2", "Second")]);

    assert!(store.delete("1"));

    // what the store now holds is exactly what a fresh open sees
    let reopened = store_in(&dir);
    assert_eq!(store.commands(), reopened.commands());
}

#[test]
fn delete_of_unknown_id_is_a_noop() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = seeded_store(&dir, &[command("1", "First")]);
    assert!(!store.delete("nope"));
    assert_eq!(store.len(), 1);
}

#[test]
fn reload_picks_up_external_changes() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = seeded_store(&dir, &[command("1", "First")]);

    let replacement = [command("9", "Replaced")];
    let encoded = serde_json::to_string_pretty(&replacement).expect("encode fixture");
    fs::write(dir.path().join("commands.json"), encoded).expect("write fixture");

    store.reload();
    assert_eq!(store.commands(), &replacement);
}

#[test]
fn generated_ids_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..64 {
        assert!(seen.insert(CommandStore::generate_id()));
    }
}

#[test]
fn missing_description_round_trips_as_none() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("commands.json");
    fs::write(
        &path,
        r#"[{"id":"1","name":"Plain","command":"plain-body"}]"#,
    )
    .expect("write fixture");
    let store = CommandStore::open(path);
    assert_eq!(store.commands()[0].description, None);
}

#[test]
fn append_creates_missing_parent_directories() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("deeper").join("commands.json");
    let mut store = CommandStore::open(path.clone());
    store.append(command("1", "First"));
    assert!(path.exists());
}

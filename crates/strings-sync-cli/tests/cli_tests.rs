use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_trees() -> TempDir {
    let temp = TempDir::new().unwrap();
    let server = temp.path().join("server");
    let app = temp.path().join("app");

    write(&server, "en-us/strings.json", r#"{"save": "Save", "close": "Close"}"#);
    write(&app, "en-us/strings.json", r#"{"save": "Save", "close": "Close tab"}"#);
    write(&server, "de-de/strings.json", r#"{"save": "Speichern"}"#);
    write(&app, "de-de/strings.json", "{}");
    write(&app, "fr-fr/strings.json", r#"{"save": "Enregistrer"}"#);

    temp
}

fn cli(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("strings-sync");
    cmd.current_dir(temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sync_copies_translations() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("de-de"))
        .stdout(predicate::str::contains("strings.json server +0 -0  app +1 -0"))
        .stdout(predicate::str::contains("Not propagating 1 key(s)"))
        .stdout(predicate::str::contains(
            "Done: server +0 -0, app +1 -0 across 2 language(s)",
        ));

    assert_eq!(
        fs::read_to_string(temp.path().join("app/de-de/strings.json")).unwrap(),
        "{\n  \"save\": \"Speichern\"\n}\n"
    );
    assert!(temp.path().join("server/fr-fr/strings.json").exists());
    assert!(!temp.path().join("strings-sync.toml").exists());
}

#[test]
fn test_second_sync_reports_in_sync() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "--e2e"])
        .assert()
        .success();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All trees are in sync!"));
}

#[test]
fn test_sync_remembers_paths() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "app", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved tree paths to"));

    assert!(temp.path().join("strings-sync.toml").exists());

    cli(&temp)
        .args(["sync", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded tree paths from"))
        .stdout(predicate::str::contains("All trees are in sync!"));
}

#[test]
fn test_sync_without_paths_or_config_fails() {
    let temp = TempDir::new().unwrap();

    cli(&temp)
        .args(["sync", "--e2e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved tree paths found"));
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let temp = setup_trees();
    let before = fs::read_to_string(temp.path().join("app/de-de/strings.json")).unwrap();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "--dry-run", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would copy"))
        .stdout(predicate::str::contains("Would update:"))
        .stdout(predicate::str::contains("@@ -1 +1,3 @@"))
        .stdout(predicate::str::contains("+  \"save\": \"Speichern\""))
        .stdout(predicate::str::contains("Would sync:"));

    assert_eq!(
        fs::read_to_string(temp.path().join("app/de-de/strings.json")).unwrap(),
        before
    );
    assert!(!temp.path().join("server/fr-fr").exists());
}

#[test]
fn test_sync_single_locale() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "-l", "de-de", "--e2e"])
        .assert()
        .success();

    assert!(!temp.path().join("server/fr-fr").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("app/de-de/strings.json")).unwrap(),
        "{\n  \"save\": \"Speichern\"\n}\n"
    );
}

#[test]
fn test_sync_unknown_locale_fails() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "-l", "xx", "--e2e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locale 'xx' not found"));
}

#[test]
fn test_sync_missing_tree_fails() {
    let temp = setup_trees();

    cli(&temp)
        .args(["sync", "server", "nowhere", "--e2e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app tree not found"));

    assert!(!temp.path().join("strings-sync.toml").exists());
}

#[test]
fn test_sync_duplicate_key_fails() {
    let temp = setup_trees();
    write(
        &temp.path().join("server"),
        "en-us/more.json",
        r#"{"save": "Save again"}"#,
    );

    cli(&temp)
        .args(["sync", "server", "app", "--no-save", "--e2e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key 'save'"));
}

#[test]
fn test_languages_lists_presence() {
    let temp = setup_trees();

    cli(&temp)
        .args(["languages", "server", "app", "--no-save", "--e2e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("de-de        server, app"))
        .stdout(predicate::str::contains("fr-fr        app only"));
}

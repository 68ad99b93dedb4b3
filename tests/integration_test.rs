use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn kuviyam_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kuviyam"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    kuviyam_cmd().current_dir(dir).args(args).output().unwrap()
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = kuviyam_cmd()
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn init(dir: &Path, backend: &str) {
    let output = run(dir, &["init", "--backend", backend]);
    assert!(output.status.success(), "{}", stderr(&output));
}

fn add_json(dir: &Path, args: &[&str], content: &str) -> serde_json::Value {
    let mut full = args.to_vec();
    full.extend(["--stdin", "--json"]);
    let output = run_with_stdin(dir, &full, content);
    assert!(output.status.success(), "{}", stderr(&output));
    serde_json::from_str(&stdout(&output)).unwrap()
}

#[test]
fn test_init_creates_kuviyam_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["init"]);

    assert!(output.status.success());
    assert!(tmp.path().join(".kuviyam").is_dir());
    assert!(tmp.path().join(".kuviyam/config.yaml").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["init"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Already initialized"));
}

#[test]
fn test_init_rejects_unknown_backend() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["init", "--backend", "redis"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid storage backend"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "dump", "--title", "Test"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not in a kuviyam project"));
}

#[test]
fn test_full_dump_workflow() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");

    let standup = add_json(
        tmp.path(),
        &["add", "dump", "--title", "Standup"],
        "Meeting notes #work #followup and more #WORK",
    );
    assert_eq!(standup["type"], "dump");
    assert_eq!(standup["tags"], serde_json::json!(["work", "followup"]));
    let standup_id = standup["id"].as_str().unwrap().to_string();

    add_json(tmp.path(), &["add", "dump", "--title", "Groceries"], "milk #home");

    // Newest first
    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    let groceries_at = listing.find("Groceries").unwrap();
    let standup_at = listing.find("Standup").unwrap();
    assert!(groceries_at < standup_at);

    // Tag filter, with and without '#'
    for tag in ["work", "#work", "WORK"] {
        let output = run(tmp.path(), &["list", "--tag", tag]);
        let listing = stdout(&output);
        assert!(listing.contains("Standup"));
        assert!(!listing.contains("Groceries"));
    }

    // Case-insensitive search over title and content
    let output = run(tmp.path(), &["list", "--search", "MILK"]);
    let listing = stdout(&output);
    assert!(listing.contains("Groceries"));
    assert!(!listing.contains("Standup"));

    // Query prefixes
    let output = run(tmp.path(), &["search", "tag:home milk"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Groceries"));

    // Edit recomputes tags
    let output = run_with_stdin(
        tmp.path(),
        &["edit", &standup_id, "--stdin", "--json"],
        "moved to #planning",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let edited: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(edited["title"], "Standup");
    assert_eq!(edited["tags"], serde_json::json!(["planning"]));

    // Get by id prefix
    let prefix = &standup_id[..standup_id.len() - 2];
    let output = run(tmp.path(), &["get", prefix]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("moved to #planning"));

    // Tags
    let output = run(tmp.path(), &["tags"]);
    let tags = stdout(&output);
    assert!(tags.contains("#home (1)"));
    assert!(tags.contains("#planning (1)"));
    assert!(!tags.contains("#work"));

    // Delete
    let output = run(tmp.path(), &["delete", &standup_id, "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Deleted"));

    let output = run(tmp.path(), &["get", &standup_id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Note not found"));
}

#[test]
fn test_list_by_date_range() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    run(tmp.path(), &["add", "dump", "--title", "Today"]);

    let output = run(tmp.path(), &["list", "--to", "2000-01-01"]);
    assert!(stdout(&output).contains("No notes found."));

    let output = run(tmp.path(), &["list", "--from", "2000-01-01", "--to", "not-a-date"]);
    assert!(stdout(&output).contains("Today"));
}

#[test]
fn test_hooks_for_site() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");

    let hook = add_json(
        tmp.path(),
        &["add", "hook", "https://docs.rs/serde/latest", "--title", "Serde docs"],
        "derive notes #rust",
    );
    assert_eq!(hook["type"], "hook");
    assert_eq!(hook["domain"], "docs.rs");
    assert_eq!(hook["url"], "https://docs.rs/serde/latest");

    run(tmp.path(), &["add", "hook", "https://crates.io/crates/serde", "--title", "Crate page"]);
    run(tmp.path(), &["add", "dump", "--title", "Loose thought"]);

    let output = run(tmp.path(), &["list", "--site", "https://docs.rs/regex"]);
    let listing = stdout(&output);
    assert!(listing.contains("Serde docs"));
    assert!(!listing.contains("Crate page"));
    assert!(!listing.contains("Loose thought"));

    let output = run(tmp.path(), &["list", "hook"]);
    let listing = stdout(&output);
    assert!(listing.contains("Serde docs"));
    assert!(listing.contains("Crate page"));
    assert!(!listing.contains("Loose thought"));
}

#[test]
fn test_list_rejects_unknown_type() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");

    let output = run(tmp.path(), &["list", "task"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid note type: task"));
}

#[test]
fn test_export_to_stdout_and_file() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    add_json(tmp.path(), &["add", "dump", "--title", "Groceries"], "milk #home");

    let output = run(tmp.path(), &["export", "-o", "-"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("# Groceries\ntype: dump | created: "));
    assert!(text.contains(" | url: -\nmilk #home\n\n"));

    let output = run(tmp.path(), &["export"]);
    assert!(output.status.success());
    let written = std::fs::read_to_string(tmp.path().join("kuviyam-notes.txt")).unwrap();
    assert_eq!(written, text);
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    let note = add_json(tmp.path(), &["add", "dump"], "keep me");
    let id = note["id"].as_str().unwrap();

    let output = run(tmp.path(), &["delete", id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = run(tmp.path(), &["get", id]);
    assert!(output.status.success());
}

#[test]
fn test_clear() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    run(tmp.path(), &["add", "dump"]);
    run(tmp.path(), &["add", "hook", "https://example.com"]);

    let output = run(tmp.path(), &["clear", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2 removed"));

    let output = run(tmp.path(), &["list"]);
    assert!(stdout(&output).contains("No notes found."));
}

#[test]
fn test_settings() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");

    let output = run(tmp.path(), &["settings", "show", "--json"]);
    let settings: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        settings,
        serde_json::json!({"backupMode": "local", "driveFolderId": ""})
    );

    let output = run(
        tmp.path(),
        &["settings", "set", "--backup-mode", "drive", "--drive-folder", "  abc123 "],
    );
    assert!(output.status.success());

    let output = run(tmp.path(), &["settings", "show", "--json"]);
    let settings: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        settings,
        serde_json::json!({"backupMode": "drive", "driveFolderId": "abc123"})
    );

    let output = run(tmp.path(), &["settings", "set", "--backup-mode", "cloud"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid backup mode"));
}

#[test]
fn test_sqlite_backend_workflow() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "sqlite");

    add_json(tmp.path(), &["add", "dump", "--title", "Stored in sqlite"], "#db");

    assert!(tmp.path().join(".kuviyam/kuviyam.db").exists());
    assert!(!tmp.path().join(".kuviyam/notes.json").exists());

    let output = run(tmp.path(), &["list", "--tag", "db"]);
    assert!(stdout(&output).contains("Stored in sqlite"));
}

#[test]
fn test_commands_find_project_from_subdirectory() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    let nested = tmp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    let output = run(&nested, &["add", "dump", "--title", "From below"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = run(tmp.path(), &["list"]);
    assert!(stdout(&output).contains("From below"));
}

#[test]
fn test_site_filter_rejects_dump_type() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    run(tmp.path(), &["add", "hook", "https://docs.rs/serde", "--title", "Serde docs"]);

    let output = run(tmp.path(), &["list", "dump", "--site", "https://docs.rs/serde"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--site only lists hook notes"));

    let output = run(tmp.path(), &["list", "hook", "--site", "https://docs.rs/serde"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Serde docs"));
}

#[test]
fn test_edit_without_changes_is_rejected() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    let note = add_json(tmp.path(), &["add", "dump", "--title", "Fixed"], "body");
    let id = note["id"].as_str().unwrap();

    let output = run(tmp.path(), &["edit", id]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nothing to change"));

    let output = run(tmp.path(), &["get", id, "--json"]);
    let stored: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(stored["updatedAt"], note["updatedAt"]);
}

#[test]
fn test_unrecognised_stored_values_stay_usable() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "json");
    std::fs::write(
        tmp.path().join(".kuviyam/notes.json"),
        r#"[{"id":"a","type":"dump","title":"Kept","content":"x"},{"id":"b","type":"page"}]"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join(".kuviyam/settings.json"),
        r#"{"backupMode":"cloud","driveFolderId":"x"}"#,
    )
    .unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Kept"));

    let output = run(tmp.path(), &["settings", "show", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let settings: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(settings["backupMode"], "local");

    let output = run(tmp.path(), &["clear", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2 removed"));
}

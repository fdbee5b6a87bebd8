use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::Path;

fn dashlist(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dashlist").unwrap();
    cmd.env("DASHLIST_DATA", data_dir).env_remove("DASHLIST_LOG");
    cmd
}

fn seed_users(data_dir: &Path, count: usize, admins: &[usize]) {
    let users: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "id": format!("user-{:03}", n),
                "name": format!("User {}", n),
                "email": format!("user{}@example.com", n),
                "role": if admins.contains(&n) { "admin" } else { "user" },
                "createdAt": format!("2024-01-{:02}T00:00:00Z", n),
            })
        })
        .collect();
    std::fs::write(
        data_dir.join("users.json"),
        serde_json::to_string_pretty(&users).unwrap(),
    )
    .unwrap();
}

fn list_json(data_dir: &Path, args: &[&str]) -> Value {
    let output = dashlist(data_dir)
        .arg("list")
        .arg("users")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_list_first_page() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 25, &[]);

    let page = list_json(temp_dir.path(), &[]);
    assert_eq!(page["items"].as_array().unwrap().len(), 20);
    assert_eq!(page["total_count"], 25);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next_page"], true);
    // newest first
    assert_eq!(page["items"][0]["id"], "user-025");
}

#[test]
fn test_list_filter_then_page() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 25, &[3, 7, 19]);

    let page = list_json(temp_dir.path(), &["-f", "role=admin", "--sort", "id"]);
    let ids: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["user-003", "user-007", "user-019"]);
    assert_eq!(page["total_count"], 3);
}

#[test]
fn test_list_search_any_field() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("users.json"),
        json!([
            {"id": "a", "name": "J. Smith", "email": "jane.doe@x.com"},
            {"id": "b", "name": "Bob", "email": "bob@x.com"}
        ])
        .to_string(),
    )
    .unwrap();

    let page = list_json(temp_dir.path(), &["-s", "JANE"]);
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["id"], "a");
}

#[test]
fn test_list_table_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 3, &[]);

    dashlist(temp_dir.path())
        .args(["list", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-003"))
        .stdout(predicate::str::contains("user1@example.com"))
        .stdout(predicate::str::contains("1-3 of 3"));
}

#[test]
fn test_list_rejects_zero_page_size() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 3, &[]);

    dashlist(temp_dir.path())
        .args(["list", "users", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size must be at least 1"));
}

#[test]
fn test_list_rejects_bad_filter() {
    let temp_dir = tempfile::tempdir().unwrap();

    dashlist(temp_dir.path())
        .args(["list", "users", "-f", "lastLogin@soon"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_page_past_end_warns() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 3, &[]);

    dashlist(temp_dir.path())
        .args(["list", "users", "-p", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("past the end"));
}

#[test]
fn test_create_update_delete_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();

    dashlist(temp_dir.path())
        .args(["create", "employees", r#"{"name": "Ada", "department": "Ops"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created employees record"));

    let raw = std::fs::read_to_string(temp_dir.path().join("employees.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    let id = stored[0]["id"].as_str().unwrap().to_string();
    assert!(stored[0]["createdAt"].is_string());

    dashlist(temp_dir.path())
        .args(["update", "employees", &id, r#"{"department": "Finance"}"#])
        .assert()
        .success();

    dashlist(temp_dir.path())
        .args(["view", "employees", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finance"));

    dashlist(temp_dir.path())
        .args(["delete", "employees", &id])
        .assert()
        .success();

    dashlist(temp_dir.path())
        .args(["view", "employees", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn test_create_requires_object() {
    let temp_dir = tempfile::tempdir().unwrap();

    dashlist(temp_dir.path())
        .args(["create", "blogs", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a JSON object"));
}

#[test]
fn test_facets() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 4, &[2]);

    dashlist(temp_dir.path())
        .args(["facets", "users", "role"])
        .assert()
        .success()
        .stdout(predicate::eq("admin\nuser\n"));
}

#[test]
fn test_upload() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("cover.png");
    std::fs::write(&file, b"png").unwrap();
    let data_dir = temp_dir.path().join("data");

    dashlist(&data_dir)
        .arg("upload")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("cover.png"));

    let uploads: Vec<_> = std::fs::read_dir(data_dir.join("uploads")).unwrap().collect();
    assert_eq!(uploads.len(), 1);
}

#[test]
fn test_config_page_size() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_users(temp_dir.path(), 60, &[]);

    dashlist(temp_dir.path())
        .args(["config", "page-size", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size set to 50"));

    let page = list_json(temp_dir.path(), &[]);
    assert_eq!(page["items"].as_array().unwrap().len(), 50);

    dashlist(temp_dir.path())
        .args(["config", "page-size", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not one of page-sizes"));
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env_dir = tempfile::tempdir().unwrap();
    let flag_dir = tempfile::tempdir().unwrap();
    seed_users(flag_dir.path(), 2, &[]);

    dashlist(env_dir.path())
        .arg("--data-dir")
        .arg(flag_dir.path())
        .args(["list", "users", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-002"));
}

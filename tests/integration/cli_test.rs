//! Integration tests for the vaultshare command line.

mod helpers;

use serde_json::{Value, json};

use helpers::{TestBatch, read_json, stdout_json};

fn path_arg(path: &std::path::Path) -> &str {
    path.to_str().expect("Temp paths are UTF-8")
}

fn row<'a>(rows: &'a Value, name: &str) -> &'a Value {
    rows.as_array()
        .expect("Expected an array")
        .iter()
        .find(|r| r["name"] == name)
        .unwrap_or_else(|| panic!("No row for {name}"))
}

#[test]
fn test_aggregate_lists_uniform_and_varying_grantees() {
    let batch = TestBatch::new();
    let output = batch.run(&["aggregate", "--batch", path_arg(&batch.batch_path)]);
    assert!(output.status.success());

    let rows = stdout_json(&output);
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["name"], "Ada Lovelace");
    assert_eq!(rows[0]["level"], "owner");
    assert_eq!(rows[0]["breakdown"], "");

    let bob = row(&rows, "Bob Babbage");
    assert_eq!(bob["level"], "varies");
    assert_eq!(bob["breakdown"], "no access: F1; read: R1");
    assert_eq!(bob["pending"], false);
}

#[test]
fn test_plan_adds_group_on_every_object() {
    let batch = TestBatch::new();
    let edits = batch.write_edits(json!([
        { "op": "add", "aro_id": batch.ops, "level": "update" }
    ]));

    let output = batch.run(&[
        "plan",
        "--batch",
        path_arg(&batch.batch_path),
        "--edits",
        path_arg(&edits),
    ]);
    assert!(output.status.success());

    let report = stdout_json(&output);
    let ops = row(&report["grants"], "Ops");
    assert_eq!(ops["level"], "update");
    assert_eq!(ops["pending"], true);

    let changes = report["changes"].as_array().unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c["action"] == "grant" && c["grantee"] == "Ops"));
    assert_eq!(report["ownerless"], json!([]));
}

#[test]
fn test_plan_fails_when_last_owner_is_removed() {
    let batch = TestBatch::new();
    let edits = batch.write_edits(json!([{ "op": "remove", "aro_id": batch.ada }]));

    let output = batch.run(&[
        "plan",
        "--batch",
        path_arg(&batch.batch_path),
        "--edits",
        path_arg(&edits),
    ]);
    assert!(!output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["ownerless"], json!(["R1", "F1"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("R1, F1"));
}

#[test]
fn test_apply_writes_split_request() {
    let batch = TestBatch::new();
    let edits = batch.write_edits(json!([
        { "op": "set", "aro_id": batch.bob, "level": "owner" },
        { "op": "add", "aro_id": batch.ops }
    ]));
    let out = batch.out_path();

    let output = batch.run(&[
        "apply",
        "--batch",
        path_arg(&batch.batch_path),
        "--edits",
        path_arg(&edits),
        "--out",
        path_arg(&out),
        "--simulate",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["saved"], json!({ "resources": 2, "folders": 2 }));

    let request = read_json(&out);
    let resources = request["resources"].as_array().unwrap();
    let folders = request["folders"].as_array().unwrap();
    assert!(resources.iter().all(|p| p["aco"] == "Resource"));
    assert!(folders.iter().all(|p| p["aco"] == "Folder"));

    let bob_update = resources
        .iter()
        .find(|p| p["aro_foreign_key"] == json!(batch.bob))
        .unwrap();
    assert_eq!(bob_update["is_new"], false);
    assert_eq!(bob_update["type"], 15);
    assert!(bob_update.get("id").is_some());
    assert!(bob_update.get("delete").is_none());

    let ops_grant = folders
        .iter()
        .find(|p| p["aro_foreign_key"] == json!(batch.ops))
        .unwrap();
    assert_eq!(ops_grant["is_new"], true);
    assert_eq!(ops_grant["aro"], "Group");
    assert_eq!(ops_grant["type"], 1);
    assert!(ops_grant.get("id").is_none());
}

#[test]
fn test_apply_refuses_ownerless_batch() {
    let batch = TestBatch::new();
    let edits = batch.write_edits(json!([
        { "op": "set", "aro_id": batch.ada, "level": "read" }
    ]));
    let out = batch.out_path();

    let output = batch.run(&[
        "apply",
        "--batch",
        path_arg(&batch.batch_path),
        "--edits",
        path_arg(&edits),
        "--out",
        path_arg(&out),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn test_unknown_level_is_rejected() {
    let batch = TestBatch::new();
    let edits = batch.write_edits(json!([
        { "op": "set", "aro_id": batch.bob, "level": "admin" }
    ]));

    let output = batch.run(&[
        "plan",
        "--batch",
        path_arg(&batch.batch_path),
        "--edits",
        path_arg(&edits),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Edit #1"));
}

#[test]
fn test_search_hides_visible_grantees() {
    let batch = TestBatch::new();

    let output = batch.run(&["search", "--batch", path_arg(&batch.batch_path), "ada"]);
    assert!(output.status.success());
    let rows = stdout_json(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(batch.adam));

    let output = batch.run(&["search", "--batch", path_arg(&batch.batch_path), "ad"]);
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn test_malformed_batch_is_rejected() {
    let batch = TestBatch::new();
    batch.write_batch(json!({ "acos": [], "directory": [] }));

    let output = batch.run(&["aggregate", "--batch", path_arg(&batch.batch_path)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("VALIDATION"));
}

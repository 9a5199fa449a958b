//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use uuid::Uuid;

/// A batch of one resource and one folder written to a temp directory.
///
/// - `R1` (resource): Ada owner, Bob read.
/// - `F1` (folder): Ada owner.
/// - Directory: Ada, Adam Smith, group Ops.
pub struct TestBatch {
    /// Scratch directory holding every file of the test
    pub dir: TempDir,
    /// Path of the batch file
    pub batch_path: PathBuf,
    /// Ada Lovelace, owner of everything
    pub ada: Uuid,
    /// Bob Babbage, reader of R1 only
    pub bob: Uuid,
    /// Adam Smith, directory only
    pub adam: Uuid,
    /// Ops group, directory only
    pub ops: Uuid,
}

impl TestBatch {
    /// Create and write the batch
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let ada = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let adam = Uuid::new_v4();
        let ops = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let f1 = Uuid::new_v4();

        let ada_json = user(ada, "ada", "Ada", "Lovelace");
        let bob_json = user(bob, "bob", "Bob", "Babbage");
        let batch = json!({
            "acos": [
                {
                    "id": r1,
                    "kind": "Resource",
                    "name": "R1",
                    "permissions": [
                        permission(r1, "Resource", &ada_json, 15),
                        permission(r1, "Resource", &bob_json, 1),
                    ]
                },
                {
                    "id": f1,
                    "kind": "Folder",
                    "name": "F1",
                    "permissions": [permission(f1, "Folder", &ada_json, 15)]
                }
            ],
            "directory": [
                ada_json,
                user(adam, "asmith", "Adam", "Smith"),
                { "kind": "Group", "id": ops, "name": "Ops" }
            ]
        });

        let batch_path = dir.path().join("batch.json");
        write_json(&batch_path, &batch);

        Self {
            dir,
            batch_path,
            ada,
            bob,
            adam,
            ops,
        }
    }

    /// Write an edits file and return its path
    pub fn write_edits(&self, edits: Value) -> PathBuf {
        let path = self.dir.path().join("edits.json");
        write_json(&path, &edits);
        path
    }

    /// Overwrite the batch file
    pub fn write_batch(&self, batch: Value) {
        write_json(&self.batch_path, &batch);
    }

    /// Path for the apply command's output
    pub fn out_path(&self) -> PathBuf {
        self.dir.path().join("out").join("request.json")
    }

    /// Run the CLI with JSON output and a config file that does not exist
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_vaultshare"))
            .arg("--config")
            .arg(self.dir.path().join("absent"))
            .args(["--format", "json"])
            .args(args)
            .env("RUST_LOG", "off")
            .output()
            .expect("Failed to run vaultshare")
    }
}

/// Parse a command's stdout as JSON
pub fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// Read a JSON file
pub fn read_json(path: &Path) -> Value {
    let raw = std::fs::read(path).expect("Failed to read file");
    serde_json::from_slice(&raw).expect("File is not JSON")
}

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).expect("Failed to encode"))
        .expect("Failed to write file");
}

fn user(id: Uuid, username: &str, first: &str, last: &str) -> Value {
    json!({
        "kind": "User",
        "id": id,
        "username": username,
        "first_name": first,
        "last_name": last
    })
}

fn permission(aco_id: Uuid, aco_kind: &str, aro: &Value, level: i32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "aco_id": aco_id,
        "aco_kind": aco_kind,
        "aro": aro,
        "level": level
    })
}

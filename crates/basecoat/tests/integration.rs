//! End-to-end CLI integration tests for the `basecoat` binary.
//!
//! Each test creates its own temporary directory, initializes a basecoat
//! project, and exercises the binary as a subprocess via `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `basecoat` binary.
fn basecoat(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("basecoat").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("BASECOAT_DIR")
        .env_remove("BASECOAT_DB")
        .env("NO_COLOR", "1");
    cmd
}

/// Initialize a fresh basecoat project in a temp directory.
fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    basecoat(&tmp).args(["init", "--quiet"]).assert().success();
    tmp
}

/// Submit a payload on stdin and return the parsed `--json` response.
fn submit(tmp: &TempDir, payload: &Value, extra_args: &[&str]) -> Value {
    let mut args = vec!["submit", "--json"];
    args.extend_from_slice(extra_args);
    let output = basecoat(tmp)
        .args(&args)
        .write_stdin(payload.to_string())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "submit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Run `show --json` for a formula.
fn show(tmp: &TempDir, id: i64) -> Value {
    let output = basecoat(tmp)
        .args(["show", &id.to_string(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn red_payload() -> Value {
    json!({
        "formula_name": "  red paint ",
        "formula_number": "R-100",
        "customer_name": "acme co",
        "colorant_list": {
            "Crimson": {"colorant_amount": 5},
            "Umber": {"colorant_amount": "1.5"}
        },
        "base_list": {"White": {"base_product_name": "Acme Base"}}
    })
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_layout() {
    let tmp = init_project();
    let dir = tmp.path().join(".basecoat");
    assert!(dir.join("basecoat.db").exists());
    assert!(dir.join("config.yaml").exists());
    assert!(dir.join(".gitignore").exists());
}

#[test]
fn init_twice_requires_force() {
    let tmp = init_project();
    basecoat(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    submit(&tmp, &red_payload(), &[]);
    basecoat(&tmp)
        .args(["init", "--force", "--quiet"])
        .assert()
        .success();

    let output = basecoat(&tmp).args(["list", "--json"]).output().unwrap();
    let list: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[test]
fn commands_fail_without_init() {
    let tmp = TempDir::new().unwrap();
    basecoat(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("basecoat init"));
}

// ---------------------------------------------------------------------------
// Submit: create and update
// ---------------------------------------------------------------------------

#[test]
fn submit_creates_formula_with_children() {
    let tmp = init_project();
    let response = submit(&tmp, &red_payload(), &[]);

    assert_eq!(response["success"], true);
    assert_eq!(response["created"], true);
    assert_eq!(response["colorants"]["inserted"], 2);
    assert_eq!(response["bases"]["inserted"], 1);

    let id = response["formula_id"].as_i64().unwrap();
    let detail = show(&tmp, id);
    assert_eq!(detail["formula_name"], "Red Paint");
    assert_eq!(detail["customer_name"], "Acme Co");
    assert_eq!(detail["formula_number"], "R-100");
    assert_eq!(detail["colorants"].as_array().unwrap().len(), 2);
    assert_eq!(detail["colorants"][0]["amount"], "5");
    assert_eq!(detail["bases"][0]["product_name"], "Acme Base");
}

#[test]
fn submit_from_file() {
    let tmp = init_project();
    let path = tmp.path().join("formula.json");
    std::fs::write(&path, red_payload().to_string()).unwrap();

    basecoat(&tmp)
        .args(["submit", "formula.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created formula"));
}

#[test]
fn export_edit_submit_updates_in_place() {
    let tmp = init_project();
    let id = submit(&tmp, &red_payload(), &[])["formula_id"]
        .as_i64()
        .unwrap();

    let output = basecoat(&tmp)
        .args(["export", &id.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let mut payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["formula_id"], id);

    payload["notes"] = json!("two coats");
    payload["colorant_list"]["Crimson"]["colorant_amount"] = json!(8);
    let before = show(&tmp, id);

    let response = submit(&tmp, &payload, &[]);
    assert_eq!(response["created"], false);
    assert_eq!(response["colorants"]["updated"], 2);
    assert_eq!(response["colorants"]["inserted"], 0);

    let after = show(&tmp, id);
    assert_eq!(after["notes"], "two coats");
    assert_eq!(after["colorants"][0]["id"], before["colorants"][0]["id"]);
    assert_eq!(after["colorants"][0]["amount"], "8");
    assert_eq!(after["colorants"].as_array().unwrap().len(), 2);
}

#[test]
fn keep_missing_flag_preserves_omitted_children() {
    let tmp = init_project();
    let id = submit(&tmp, &red_payload(), &[])["formula_id"]
        .as_i64()
        .unwrap();

    let partial = json!({
        "formula_id": id.to_string(),
        "colorant_list": {"Crimson": {"colorant_amount": 6}}
    });
    let response = submit(&tmp, &partial, &["--keep-missing"]);
    assert_eq!(response["colorants"]["deleted"], 0);
    assert_eq!(show(&tmp, id)["colorants"].as_array().unwrap().len(), 2);

    let response = submit(&tmp, &partial, &[]);
    assert_eq!(response["colorants"]["deleted"], 1);
    assert_eq!(response["bases"]["deleted"], 1);
    assert_eq!(show(&tmp, id)["colorants"].as_array().unwrap().len(), 1);
}

#[test]
fn submit_without_name_is_rejected() {
    let tmp = init_project();
    basecoat(&tmp)
        .args(["submit", "--json"])
        .write_stdin(json!({"customer_name": "Acme"}).to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("formula rejected"))
        .stderr(predicate::str::contains("formula_name is required"));
}

#[test]
fn submit_unknown_formula_fails() {
    let tmp = init_project();
    basecoat(&tmp)
        .arg("submit")
        .write_stdin(json!({"formula_id": 404, "formula_name": "Ghost"}).to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("omit formula_id to create one"))
        .stderr(predicate::str::contains("formula not found: 404"));
}

#[test]
fn update_keeps_submitted_casing() {
    let tmp = init_project();
    let id = submit(&tmp, &red_payload(), &[])["formula_id"]
        .as_i64()
        .unwrap();
    submit(
        &tmp,
        &json!({"formula_id": id, "formula_name": "mcRED deluxe"}),
        &["--keep-missing"],
    );
    assert_eq!(show(&tmp, id)["formula_name"], "mcRED deluxe");
}

#[test]
fn submit_malformed_json_fails() {
    let tmp = init_project();
    basecoat(&tmp)
        .arg("submit")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid formula payload"));
}

// ---------------------------------------------------------------------------
// Listing, seeding, clearing
// ---------------------------------------------------------------------------

#[test]
fn populate_list_stats_empty() {
    let tmp = init_project();
    basecoat(&tmp)
        .args(["populate", "5", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted 5 formulas"));

    let output = basecoat(&tmp).args(["list", "--json"]).output().unwrap();
    let list: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 5);

    let output = basecoat(&tmp).args(["stats", "--json"]).output().unwrap();
    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["formulas"], 5);
    assert_eq!(stats["colorants"], 10);
    assert_eq!(stats["bases"], 5);

    basecoat(&tmp)
        .arg("empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    basecoat(&tmp)
        .args(["empty", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared table: colorants (10 rows)"))
        .stdout(predicate::str::contains("Cleared table: formulas (5 rows)"));

    basecoat(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No formulas found."));
}

#[test]
fn list_table_output() {
    let tmp = init_project();
    submit(&tmp, &red_payload(), &[]);
    basecoat(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("Red Paint"))
        .stdout(predicate::str::contains("Acme Co"));
}

#[test]
fn db_flag_overrides_discovery() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("custom.db");
    let db_arg = db.to_str().unwrap();

    basecoat(&tmp)
        .args(["init", "--quiet", "--db", db_arg])
        .assert()
        .success();
    assert!(db.exists());

    basecoat(&tmp)
        .args(["submit", "--db", db_arg])
        .write_stdin(red_payload().to_string())
        .assert()
        .success();
}

#[test]
fn config_disables_title_case() {
    let tmp = init_project();
    std::fs::write(
        tmp.path().join(".basecoat").join("config.yaml"),
        "upsert:\n  title-case: false\n",
    )
    .unwrap();

    let id = submit(&tmp, &red_payload(), &[])["formula_id"]
        .as_i64()
        .unwrap();
    assert_eq!(show(&tmp, id)["formula_name"], "red paint");
}

#[test]
fn version_and_completion() {
    let tmp = TempDir::new().unwrap();
    basecoat(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("basecoat version"));
    basecoat(&tmp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("basecoat"));
}

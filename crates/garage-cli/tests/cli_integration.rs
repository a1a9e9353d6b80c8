use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn garage(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("garage").unwrap();
    cmd.env_remove("GARAGE_DEBUG_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn run_ok(data_dir: &Path, args: &[&str]) -> Value {
    let output = garage(data_dir)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert_eq!(json["success"], true);
    json
}

fn seed_vehicles(data_dir: &Path) {
    fs::create_dir_all(data_dir).unwrap();
    fs::write(
        data_dir.join("vehicles.json"),
        r#"[{"id":"v1","licensePlate":"京A12345","brand":"Toyota","status":"in_service"}]"#,
    )
    .unwrap();
}

fn read_collection(data_dir: &Path, key: &str) -> Value {
    serde_json::from_slice(&fs::read(data_dir.join(format!("{}.json", key))).unwrap()).unwrap()
}

fn single_file(dir: &TempDir) -> std::path::PathBuf {
    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "{:?}", entries);
    entries.into_iter().next().unwrap()
}

mod backup_tests {
    use super::*;

    #[test]
    fn test_backup_create_and_list() {
        let dir = tempdir().unwrap();
        seed_vehicles(dir.path());

        let created = run_ok(dir.path(), &["backup", "create"]);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("backup_"));

        let listed = run_ok(dir.path(), &["backup", "list"]);
        assert_eq!(listed["data"]["count"], 1);
        assert_eq!(listed["data"]["items"][0]["id"], id.as_str());
    }

    #[test]
    fn test_restore_brings_back_data() {
        let dir = tempdir().unwrap();
        seed_vehicles(dir.path());

        let created = run_ok(dir.path(), &["backup", "create"]);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        fs::write(dir.path().join("vehicles.json"), "[]").unwrap();
        run_ok(dir.path(), &["backup", "restore", "--id", &id]);

        let vehicles = read_collection(dir.path(), "vehicles");
        assert_eq!(vehicles[0]["licensePlate"], "京A12345");
    }

    #[test]
    fn test_restore_unknown_backup_fails() {
        let dir = tempdir().unwrap();

        garage(dir.path())
            .args(["backup", "restore", "--id", "backup_missing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Backup not found"))
            .stderr(predicate::str::contains("\"success\":false"));
    }

    #[test]
    fn test_delete_unknown_backup_succeeds() {
        let dir = tempdir().unwrap();
        let json = run_ok(dir.path(), &["backup", "delete", "--id", "backup_missing"]);
        assert_eq!(json["data"]["deleted"], "backup_missing");
    }

    #[test]
    fn test_delete_removes_backup() {
        let dir = tempdir().unwrap();
        let created = run_ok(dir.path(), &["backup", "create"]);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        run_ok(dir.path(), &["backup", "delete", "--id", &id]);

        let listed = run_ok(dir.path(), &["backup", "list"]);
        assert_eq!(listed["data"]["count"], 0);
    }

    #[test]
    fn test_retention_limit() {
        let dir = tempdir().unwrap();
        run_ok(dir.path(), &["config", "set", "--max-backups", "2"]);

        for _ in 0..3 {
            run_ok(dir.path(), &["backup", "create"]);
        }

        let listed = run_ok(dir.path(), &["backup", "list"]);
        assert_eq!(listed["data"]["count"], 2);
    }

    #[test]
    fn test_backup_export_writes_file() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let created = run_ok(dir.path(), &["backup", "create"]);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        run_ok(
            dir.path(),
            &["backup", "export", "--id", &id, "--out", out.path().to_str().unwrap()],
        );

        let file = single_file(&out);
        let name = file.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&format!("{}_", id)));
        let record: Value = serde_json::from_slice(&fs::read(file).unwrap()).unwrap();
        assert_eq!(record["id"], id.as_str());
    }

    #[test]
    fn test_check_runs_once_per_period() {
        let dir = tempdir().unwrap();

        let first = run_ok(dir.path(), &["check"]);
        assert_eq!(first["data"]["performed"], true);

        let second = run_ok(dir.path(), &["check"]);
        assert_eq!(second["data"]["performed"], false);
    }
}

mod export_tests {
    use super::*;

    #[test]
    fn test_vehicle_csv_export() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed_vehicles(dir.path());

        let json = run_ok(
            dir.path(),
            &[
                "export",
                "--scope",
                "vehicles",
                "--format",
                "csv",
                "--out",
                out.path().to_str().unwrap(),
            ],
        );
        assert_eq!(json["data"]["usedFallback"], false);

        let file = single_file(&out);
        assert!(file
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("export_vehicles_"));
        let text = fs::read_to_string(file).unwrap();
        assert!(text.starts_with('\u{feff}'));
        assert!(text.contains("京A12345"));
    }

    #[test]
    fn test_empty_excel_export_uses_sample_content() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();

        let json = run_ok(
            dir.path(),
            &[
                "export",
                "--scope",
                "invoices",
                "--format",
                "excel",
                "--out",
                out.path().to_str().unwrap(),
            ],
        );
        assert_eq!(json["data"]["usedFallback"], true);

        let file = single_file(&out);
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("xls"));
        assert!(fs::read_to_string(file).unwrap().contains("<Workbook"));
    }

    #[test]
    fn test_invalid_scope_is_rejected() {
        let dir = tempdir().unwrap();
        garage(dir.path())
            .args(["export", "--scope", "boards"])
            .assert()
            .failure();
    }

    #[test]
    fn test_export_all_includes_users() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(
            dir.path().join("users.json"),
            r#"[{"id":"u1","username":"admin"}]"#,
        )
        .unwrap();

        run_ok(
            dir.path(),
            &["export-all", "--out", out.path().to_str().unwrap()],
        );

        let file = single_file(&out);
        assert!(file
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("full-backup_all_"));
        let doc: Value = serde_json::from_slice(&fs::read(file).unwrap()).unwrap();
        assert_eq!(doc["users"][0]["username"], "admin");
        assert_eq!(doc["version"], "1.0");
    }
}

mod import_tests {
    use super::*;

    #[test]
    fn test_vehicles_only_import() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("users.json"),
            r#"[{"id":"u1","username":"admin"}]"#,
        )
        .unwrap();
        let source = tempdir().unwrap();
        let file = source.path().join("import.json");
        fs::write(&file, r#"{"vehicles":[{"id":"v2","licensePlate":"NEW-2"}]}"#).unwrap();

        let json = run_ok(dir.path(), &["import", "--file", file.to_str().unwrap()]);
        assert_eq!(json["data"]["replaced"][0]["name"], "vehicles");
        assert_eq!(json["data"]["replaced"][0]["count"], 1);

        assert_eq!(read_collection(dir.path(), "vehicles")[0]["id"], "v2");
        assert_eq!(read_collection(dir.path(), "users")[0]["id"], "u1");
    }

    #[test]
    fn test_malformed_import_fails() {
        let dir = tempdir().unwrap();
        seed_vehicles(dir.path());
        let source = tempdir().unwrap();
        let file = source.path().join("broken.json");
        fs::write(&file, "{\"vehicles\": [").unwrap();

        garage(dir.path())
            .args(["import", "--file", file.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not valid JSON"));

        assert_eq!(read_collection(dir.path(), "vehicles")[0]["id"], "v1");
    }

    #[test]
    fn test_export_all_round_trips_through_import() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed_vehicles(dir.path());
        run_ok(
            dir.path(),
            &["export-all", "--out", out.path().to_str().unwrap()],
        );
        let exported = single_file(&out);

        let restored = tempdir().unwrap();
        run_ok(
            restored.path(),
            &["import", "--file", exported.to_str().unwrap()],
        );

        let vehicles = read_collection(restored.path(), "vehicles");
        assert_eq!(vehicles[0]["licensePlate"], "京A12345");
        assert_eq!(vehicles[0]["status"], "in_service");
        assert_eq!(read_collection(restored.path(), "users"), serde_json::json!([]));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let dir = tempdir().unwrap();
        let json = run_ok(dir.path(), &["config", "show"]);
        assert_eq!(json["data"]["enabled"], true);
        assert_eq!(json["data"]["frequency"], "daily");
        assert_eq!(json["data"]["maxBackups"], 30);
    }

    #[test]
    fn test_config_set_persists() {
        let dir = tempdir().unwrap();
        run_ok(
            dir.path(),
            &["config", "set", "--frequency", "weekly", "--enabled", "false"],
        );

        let json = run_ok(dir.path(), &["config", "show"]);
        assert_eq!(json["data"]["frequency"], "weekly");
        assert_eq!(json["data"]["enabled"], false);

        let check = run_ok(dir.path(), &["check"]);
        assert_eq!(check["data"]["performed"], false);
    }

    #[test]
    fn test_zero_max_backups_is_rejected() {
        let dir = tempdir().unwrap();
        garage(dir.path())
            .args(["config", "set", "--max-backups", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("maxBackups"));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let dir = tempdir().unwrap();
        garage(dir.path())
            .args(["config", "set"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nothing to change"));
    }
}

#[test]
fn test_completions() {
    let dir = tempdir().unwrap();
    garage(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("garage"));
}

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pcc(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pcc").unwrap();
    cmd.arg("--cwd").arg(root).env_remove("PCC_CWD").env_remove("RUST_LOG");
    cmd
}

fn create_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("pnpm-workspace.yaml"),
        "packages:\n  - packages/*\ncatalog:\n  react: ^18.2.0\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("packages/web")).unwrap();
    fs::write(
        root.join("packages/web/package.json"),
        "{\"dependencies\":{\"react\":\"catalog:\"}}",
    )
    .unwrap();

    temp_dir
}

/// Run `backup create` and return the new id
fn create_backup(root: &Path, args: &[&str]) -> String {
    let output = pcc(root)
        .args(["backup", "create"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .find_map(|line| line.strip_prefix("Backup created: "))
        .map(str::to_string)
        .expect("create prints the backup id")
}

#[test]
fn test_create_and_list() {
    let temp = create_workspace();
    let id = create_backup(
        temp.path(),
        &["pnpm-workspace.yaml", "missing.json", "-d", "Create categories: ui"],
    );

    pcc(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Create categories: ui"))
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn test_create_reports_partial_capture() {
    let temp = create_workspace();

    pcc(temp.path())
        .args(["backup", "create", "pnpm-workspace.yaml", "missing.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1 of 2 file(s)"));
}

#[test]
fn test_create_defaults_to_workspace_files() {
    let temp = create_workspace();
    let id = create_backup(temp.path(), &[]);

    pcc(temp.path())
        .args(["backup", "show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm-workspace.yaml"))
        .stdout(predicate::str::contains("packages/web/package.json"))
        .stdout(predicate::str::contains("Complete backup (2 file(s))"));
}

#[test]
fn test_list_without_backups() {
    let temp = create_workspace();

    pcc(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found."));
}

#[test]
fn test_restore_requires_force() {
    let temp = create_workspace();
    let workspace = temp.path().join("pnpm-workspace.yaml");
    create_backup(temp.path(), &["pnpm-workspace.yaml"]);
    fs::write(&workspace, "catalogs:\n  ui:\n    react: ^18.2.0\n").unwrap();

    pcc(temp.path())
        .args(["backup", "restore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    assert_eq!(
        fs::read_to_string(&workspace).unwrap(),
        "catalogs:\n  ui:\n    react: ^18.2.0\n"
    );
}

#[test]
fn test_restore_latest_with_force() {
    let temp = create_workspace();
    let workspace = temp.path().join("pnpm-workspace.yaml");
    let original = fs::read_to_string(&workspace).unwrap();
    let id = create_backup(temp.path(), &[]);
    fs::write(&workspace, "catalogs: {}\n").unwrap();
    fs::remove_file(temp.path().join("packages/web/package.json")).unwrap();

    pcc(temp.path())
        .args(["backup", "restore", "--force", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 2 file(s)"))
        .stdout(predicate::str::contains(format!("Backup {} deleted.", id)));

    assert_eq!(fs::read_to_string(&workspace).unwrap(), original);
    assert!(temp.path().join("packages/web/package.json").exists());
    assert!(!temp.path().join(".pcc/backups").join(&id).exists());
}

#[test]
fn test_restore_delete_keeps_partial_backup() {
    let temp = create_workspace();
    let id = create_backup(temp.path(), &[]);
    let snapshot = temp.path().join(".pcc/backups").join(&id);
    fs::remove_file(snapshot.join("packages/web/package.json")).unwrap();

    pcc(temp.path())
        .args(["backup", "restore", id.as_str(), "--force", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 of 2 file(s)"))
        .stdout(predicate::str::contains("kept because the restore was partial"));

    assert!(snapshot.join("manifest.json").exists());
}

#[test]
fn test_undo_alias() {
    let temp = create_workspace();
    let id = create_backup(temp.path(), &["pnpm-workspace.yaml"]);

    pcc(temp.path())
        .args(["backup", "undo", id.as_str(), "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 file(s)"));
}

#[test]
fn test_restore_without_backups_fails() {
    let temp = create_workspace();

    pcc(temp.path())
        .args(["backup", "restore", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backup not found: latest"));
}

#[test]
fn test_delete_backup() {
    let temp = create_workspace();
    let id = create_backup(temp.path(), &["pnpm-workspace.yaml"]);

    pcc(temp.path())
        .args(["backup", "delete", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted backup: {}", id)));

    pcc(temp.path())
        .args(["backup", "delete", id.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backup not found"));
}

#[test]
fn test_clear_backups() {
    let temp = create_workspace();
    create_backup(temp.path(), &["pnpm-workspace.yaml"]);
    create_backup(temp.path(), &["pnpm-workspace.yaml"]);

    pcc(temp.path())
        .args(["backup", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This will delete 2 backup(s)."));

    pcc(temp.path())
        .args(["backup", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 backup(s)."));

    pcc(temp.path())
        .args(["backup", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups to delete."));
}

#[test]
fn test_corrupt_backup_is_ignored() {
    let temp = create_workspace();
    let id = create_backup(temp.path(), &["pnpm-workspace.yaml"]);

    let corrupt = temp.path().join(".pcc/backups/19990101_000000");
    fs::create_dir_all(&corrupt).unwrap();
    fs::write(corrupt.join("manifest.json"), "{ broken").unwrap();

    pcc(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("19990101_000000").not())
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn test_missing_cwd_fails() {
    let temp = TempDir::new().unwrap();

    pcc(&temp.path().join("nope"))
        .args(["backup", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

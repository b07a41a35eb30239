//! Integration tests for the scan command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;
use tempfile::TempDir;

fn flutter_sweeper() -> Command {
    Command::cargo_bin("flutter-sweeper").unwrap()
}

fn make_project(path: &Path) {
    fs::create_dir_all(path.join("lib")).unwrap();
    fs::write(path.join("pubspec.yaml"), "name: app\n").unwrap();
}

#[test]
fn test_scan_lists_nested_projects() {
    let tmp = TempDir::new().unwrap();
    make_project(&tmp.path().join("proj"));
    make_project(&tmp.path().join("proj/sub"));

    flutter_sweeper()
        .arg("scan")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/sub"))
        .stdout(predicate::str::contains("Total: 2 projects"));
}

#[test]
fn test_scan_json_output() {
    let tmp = TempDir::new().unwrap();
    make_project(&tmp.path().join("proj"));
    make_project(&tmp.path().join("proj/sub"));

    let output = flutter_sweeper()
        .args(["scan", "--json"])
        .arg(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let projects: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "proj");
    assert_eq!(projects[1]["name"], "sub");
}

#[test]
fn test_scan_ignores_symlinked_copy() {
    let tmp = TempDir::new().unwrap();
    let real = tmp.path().join("real");
    make_project(&real);
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    symlink(&real, root.join("copy")).unwrap();

    flutter_sweeper()
        .arg("scan")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("No Flutter projects found"));
}

#[test]
fn test_scan_requires_both_markers() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("only_manifest")).unwrap();
    fs::write(tmp.path().join("only_manifest/pubspec.yaml"), "").unwrap();
    fs::create_dir_all(tmp.path().join("only_lib/lib")).unwrap();

    flutter_sweeper()
        .arg("scan")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No Flutter projects found"));
}

#[test]
fn test_scan_missing_root() {
    let tmp = TempDir::new().unwrap();

    flutter_sweeper()
        .arg("scan")
        .arg(tmp.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Root path not found"));
}

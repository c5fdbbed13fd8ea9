//! Integration tests for addonpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

fn addonpack_cmd() -> Command {
    cargo_bin_cmd!("addonpack")
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `Forest/16x` with one packable file, one doc file and a reserved dir.
fn forest_root() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    write(temp.path(), "Forest/16x/pack.png", b"pixels");
    write(temp.path(), "Forest/16x/README.md", b"# Forest");
    write(temp.path(), "Forest/16x/images/icon.png", b"icon");
    temp
}

fn entry_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    addonpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("addonpack"));
}

#[test]
fn test_help_flag() {
    addonpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_pack_help() {
    addonpack_cmd()
        .args(["pack", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tag"))
        .stdout(predicate::str::contains("--pause"));
}

#[test]
fn test_pack_interactive_end_to_end() {
    let temp = forest_root();

    addonpack_cmd()
        .arg("pack")
        .arg(temp.path())
        .write_stdin("1.0.0\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Add-on found: Forest"))
        .stdout(predicate::str::contains("Resolution found: 16x"))
        .stdout(predicate::str::contains("Files included: pack.png"))
        .stdout(predicate::str::contains("Which Minecraft version do you want to pack?"))
        .stdout(predicate::str::contains("You entered '1.0.0'. Is that correct? (Y/N)"))
        .stdout(predicate::str::contains("Packed Forest-16x-1.0.0.zip!"));

    let pack = temp.path().join("Forest-16x-1.0.0.zip");
    assert!(pack.is_file());
    assert_eq!(entry_names(&pack), vec!["pack.png"]);
}

#[test]
fn test_preview_hides_excluded_entries() {
    let temp = forest_root();

    addonpack_cmd()
        .arg("pack")
        .arg(temp.path())
        .write_stdin("1.0.0\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md").not())
        .stdout(predicate::str::contains("images").not());
}

#[test]
fn test_pack_reprompts_on_invalid_version() {
    let temp = forest_root();

    addonpack_cmd()
        .arg("pack")
        .arg(temp.path())
        .write_stdin("1.2\nv1.0.0\n1.0.0\nn\n2.0.0\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid version tag '1.2'"))
        .stdout(predicate::str::contains("Packed Forest-16x-2.0.0.zip!"));

    assert!(!temp.path().join("Forest-16x-1.0.0.zip").exists());
    assert!(temp.path().join("Forest-16x-2.0.0.zip").is_file());
}

#[test]
fn test_empty_root_reports_no_addons() {
    let temp = TempDir::new().unwrap();

    addonpack_cmd()
        .arg("pack")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No add-ons found!"))
        .stdout(predicate::str::contains("Which Minecraft version").not());

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_closed_input_is_interrupt() {
    let temp = forest_root();

    addonpack_cmd()
        .arg("pack")
        .arg(temp.path())
        .write_stdin("1.0.0\n")
        .assert()
        .code(130)
        .stderr(predicate::str::contains("Program interrupted by user."));

    assert!(!temp.path().join("Forest-16x-1.0.0.zip").exists());
}

#[test]
fn test_pack_with_tag_and_yes() {
    let temp = forest_root();

    addonpack_cmd()
        .args(["pack", "--tag", "1.20.4", "--yes"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Which Minecraft version").not())
        .stdout(predicate::str::contains("Packed Forest-16x-1.20.4.zip!"));

    assert!(temp.path().join("Forest-16x-1.20.4.zip").is_file());
}

#[test]
fn test_pack_with_tag_asks_for_confirmation() {
    let temp = forest_root();

    addonpack_cmd()
        .args(["pack", "--tag", "1.20.4"])
        .arg(temp.path())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You entered '1.20.4'"));

    assert!(temp.path().join("Forest-16x-1.20.4.zip").is_file());
}

#[test]
fn test_invalid_tag_is_error() {
    let temp = forest_root();

    addonpack_cmd()
        .args(["pack", "--tag", "1.20", "--yes"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version '1.20'"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("Forest-16x-1.20.zip").exists());
}

#[test]
fn test_output_dir() {
    let temp = forest_root();
    let out = TempDir::new().unwrap();

    addonpack_cmd()
        .args(["pack", "-t", "1.0.0", "-y", "-q", "--output-dir"])
        .arg(out.path())
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(out.path().join("Forest-16x-1.0.0.zip").is_file());
    assert!(!temp.path().join("Forest-16x-1.0.0.zip").exists());
}

#[test]
fn test_failed_pack_exits_nonzero_and_continues() {
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(temp.path(), "A/16x/a.png", b"a");
    write(temp.path(), "B/16x/b.png", b"b");
    fs::create_dir(out.path().join("A-16x-1.0.0.zip")).unwrap();

    addonpack_cmd()
        .args(["pack", "-t", "1.0.0", "-y", "-o"])
        .arg(out.path())
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Packed B-16x-1.0.0.zip!"))
        .stderr(predicate::str::contains("Failed to pack A-16x-1.0.0.zip"));

    assert!(out.path().join("B-16x-1.0.0.zip").is_file());
}

#[test]
fn test_pause_waits_for_enter() {
    let temp = forest_root();

    addonpack_cmd()
        .args(["pack", "--pause"])
        .arg(temp.path())
        .write_stdin("1.0.0\ny\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Press Enter to exit..."));
}

#[test]
fn test_pack_json_output() {
    let temp = forest_root();

    let output = addonpack_cmd()
        .args(["--json", "pack", "-t", "1.0.0", "-y"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["version"], "1.0.0");
    assert_eq!(json["data"]["succeeded"], 1);
    assert_eq!(json["data"]["packs"][0]["name"], "Forest-16x-1.0.0.zip");
    assert_eq!(json["data"]["packs"][0]["files_added"], 1);
}

#[test]
fn test_list_command() {
    let temp = forest_root();
    write(temp.path(), "Desert/32x/pack.mcmeta", b"{}");

    addonpack_cmd()
        .arg("list")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Add-on found: Desert"))
        .stdout(predicate::str::contains("Add-on found: Forest"))
        .stdout(predicate::str::contains("2 pack(s) to build"));

    // Listing never writes packs.
    assert!(!temp.path().join("Forest-16x-1.0.0.zip").exists());
}

#[test]
fn test_list_json_output() {
    let temp = forest_root();

    let output = addonpack_cmd()
        .args(["list", "--json"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "list");
    assert_eq!(json["data"]["pack_count"], 1);
    assert_eq!(json["data"]["addons"][0]["name"], "Forest");
    assert_eq!(json["data"]["addons"][0]["resolutions"][0]["files"][0], "pack.png");
}

#[test]
fn test_completion_bash() {
    addonpack_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("addonpack"));
}

#[test]
fn test_list_empty_root_reports_no_addons() {
    let temp = TempDir::new().unwrap();

    addonpack_cmd()
        .arg("list")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No add-ons found!"));
}

#[test]
fn test_list_root_without_addons_counts_zero() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "loose.txt", b"not an add-on");

    addonpack_cmd()
        .arg("list")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 add-on(s), 0 pack(s) to build"))
        .stdout(predicate::str::contains("No add-ons found!").not());
}

#[cfg(unix)]
#[test]
fn test_pack_symlinked_resolution() {
    let temp = forest_root();
    let shared = TempDir::new().unwrap();
    write(shared.path(), "pack.png", b"hd pixels");
    std::os::unix::fs::symlink(shared.path(), temp.path().join("Forest/32x")).unwrap();

    addonpack_cmd()
        .args(["pack", "-t", "1.0.0", "-y"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolution found: 32x"))
        .stdout(predicate::str::contains("Packed Forest-32x-1.0.0.zip!"));

    assert_eq!(
        entry_names(&temp.path().join("Forest-32x-1.0.0.zip")),
        vec!["pack.png"]
    );
}

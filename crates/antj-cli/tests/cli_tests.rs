//! Integration tests for the antj binaries.
//!
//! `sh` stands in for Ant: `sh -f .antj/build.xml args...` runs the build
//! file as a shell script with the forwarded arguments, so fixtures carry a
//! script where a real archive would carry Ant XML.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use antj_core::test_utils::ZipTestBuilder;
use antj_core::test_utils::create_test_zip;
use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn antj_cmd() -> Command {
    cargo_bin_cmd!("antj")
}

/// Writes a zip whose build file records its working directory and
/// arguments under `$ANTJ_TEST_OUT`, then exits with `status`.
fn script_archive(dir: &TempDir, status: i32) -> PathBuf {
    let script = format!(
        "pwd > \"$ANTJ_TEST_OUT/cwd.txt\"\n\
         printf '%s\\n' \"$@\" > \"$ANTJ_TEST_OUT/args.txt\"\n\
         cat src/hello.txt > \"$ANTJ_TEST_OUT/hello.txt\"\n\
         exit {status}\n"
    );
    let zip = ZipTestBuilder::new()
        .add_directory(".antj/")
        .add_file(".antj/build.xml", script.as_bytes())
        .add_deflated_file("src/hello.txt", b"hello from the archive")
        .build();
    let path = dir.path().join("project.zip");
    fs::write(&path, zip).unwrap();
    path
}

/// A command with `sh` as build tool and a private temp root.
fn sandboxed(dir: &TempDir) -> Command {
    let tmp = dir.path().join("tmp");
    let out = dir.path().join("out");
    fs::create_dir_all(&tmp).unwrap();
    fs::create_dir_all(&out).unwrap();

    let mut cmd = antj_cmd();
    cmd.env("TMPDIR", &tmp)
        .env("ANTJ_TEST_OUT", &out)
        .env("ANTJ_LOCALE", "C")
        .env_remove("ANTJ_ANT")
        .env_remove("ANTJ_KEEP_TEMP")
        .env_remove("ANTJ_MESSAGES")
        .env_remove("ANTJ_LOG");
    cmd
}

fn leftover_roots(dir: &TempDir) -> Vec<PathBuf> {
    fs::read_dir(dir.path().join("tmp"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

fn read_out(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join("out").join(name)).unwrap()
}

#[test]
fn test_version_flag() {
    antj_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("antj"));
}

#[test]
fn test_help_flag() {
    antj_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ARCHIVE"))
        .stdout(predicate::str::contains("--keep-temp"));
}

#[test]
fn test_missing_archive_argument_is_usage_error() {
    antj_cmd().assert().code(2);
}

#[test]
fn test_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(temp.path().join("missing.zip"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot open archive"));
}

#[test]
#[cfg(unix)]
fn test_build_runs_in_extraction_root_with_args() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(&archive)
        .args(["-Dversion=1.2", "clean", "-v", "--quiet", "dist"])
        .assert()
        .success();

    assert_eq!(read_out(&temp, "args.txt"), "-Dversion=1.2\nclean\n-v\n--quiet\ndist\n");
    assert_eq!(read_out(&temp, "hello.txt"), "hello from the archive");
    let cwd = PathBuf::from(read_out(&temp, "cwd.txt").trim());
    let name = cwd.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("antj"), "unexpected root {}", cwd.display());
    assert!(!cwd.exists());
    assert!(leftover_roots(&temp).is_empty());
}

#[test]
#[cfg(unix)]
fn test_build_failure_exits_nonzero_and_cleans_up() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 3);

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ant execution of [sh, -f, .antj/build.xml]"));

    assert!(leftover_roots(&temp).is_empty());
}

#[test]
#[cfg(unix)]
fn test_keep_temp_prints_root() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    let assert = sandboxed(&temp)
        .args(["--ant", "sh", "--keep-temp"])
        .arg(&archive)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let root = Path::new(stdout.trim());
    assert!(root.join(".antj/build.xml").is_file());
    assert_eq!(
        fs::read_to_string(root.join("src/hello.txt")).unwrap(),
        "hello from the archive"
    );
    assert_eq!(leftover_roots(&temp).len(), 1);
}

#[test]
#[cfg(unix)]
fn test_keep_temp_failed_build_reports_root() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 3);

    let assert = sandboxed(&temp)
        .args(["--ant", "sh", "--keep-temp"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("extraction root kept at"));

    let roots = leftover_roots(&temp);
    assert_eq!(roots.len(), 1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains(&roots[0].display().to_string()));
    assert!(roots[0].join(".antj/build.xml").is_file());
}

#[test]
#[cfg(unix)]
fn test_own_flags_after_archive_reach_build() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(&archive)
        .args(["-v", "-h", "--", "dist"])
        .assert()
        .success()
        .stderr(predicate::str::contains("extracted:").not());

    assert_eq!(read_out(&temp, "args.txt"), "-v\n-h\n--\ndist\n");
}

#[test]
#[cfg(unix)]
fn test_ant_program_from_environment() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .env("ANTJ_ANT", "sh")
        .arg(&archive)
        .arg("target")
        .assert()
        .success();

    assert_eq!(read_out(&temp, "args.txt"), "target\n");
}

#[test]
fn test_missing_build_tool() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .args(["--ant", "antj-test-no-such-ant"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HINT"));

    assert!(leftover_roots(&temp).is_empty());
}

#[test]
fn test_path_traversal_rejected_before_build() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("evil.zip");
    fs::write(
        &archive,
        create_test_zip(&[
            (".antj/build.xml", "touch \"$ANTJ_TEST_OUT/ran\"\n"),
            ("../../evil.txt", "x"),
        ]),
    )
    .unwrap();

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path traversal"));

    assert!(!temp.path().join("out/ran").exists());
    assert!(!temp.path().join("evil.txt").exists());
    assert!(leftover_roots(&temp).is_empty());
}

#[test]
fn test_not_a_zip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("notes.zip");
    fs::write(&archive, "just text").unwrap();

    sandboxed(&temp)
        .args(["--ant", "sh"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid archive"));
}

#[test]
fn test_missing_message_catalog_is_fatal() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .env("ANTJ_MESSAGES", temp.path().join("nope.properties"))
        .args(["--ant", "sh"])
        .arg(&archive)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Message catalog unavailable"));
}

#[test]
#[cfg(unix)]
fn test_verbose_prints_entry_lines() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = script_archive(&temp, 0);

    sandboxed(&temp)
        .args(["--ant", "sh", "-v"])
        .arg(&archive)
        .assert()
        .success()
        .stderr(predicate::str::contains("extracted: .antj/build.xml"))
        .stderr(predicate::str::contains("inflated: src/hello.txt"));
}

#[test]
fn test_embedded_binary_without_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    cargo_bin_cmd!("antj-embedded")
        .env("TMPDIR", temp.path())
        .env_remove("ANTJ_MESSAGES")
        .arg("dist")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported container"));
}

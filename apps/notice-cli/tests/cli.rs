//! Runs the built binary the way a shell user would

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_notice-cli");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/notice-pdf/tests/fixtures")
        .join(name)
}

fn notice_cli() -> Command {
    let mut command = Command::new(BIN);
    command
        .env_remove("NOTICE_TEMPLATE_DIR")
        .env("NOTICE_TIME_ZONE", "utc");
    command
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = notice_cli()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn assert_pdf(path: &Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "{} is not a PDF", path.display());
}

#[test]
fn test_file_input_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notice.pdf");

    let status = notice_cli()
        .args(["--json-file", fixture("full_notice.json").to_str().unwrap()])
        .args(["--output", output.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert_pdf(&output);
}

#[test]
fn test_stdin_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notice.pdf");
    let json = std::fs::read(fixture("minimal_notice.json")).unwrap();

    let result = run_with_stdin(&["--json-file", "-", "-o", output.to_str().unwrap()], &json);

    assert_eq!(result.status.code(), Some(0));
    assert_pdf(&output);
}

#[test]
fn test_flat_record_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("pdfs");

    let status = notice_cli()
        .args(["-j", fixture("flat_meeting.json").to_str().unwrap()])
        .args(["-d", out_dir.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert_pdf(&out_dir.join("convocatoria_reunion_01HXYZ123456789ABCDEF.pdf"));
}

#[test]
fn test_default_output_in_working_dir() {
    let dir = tempfile::tempdir().unwrap();

    let status = notice_cli()
        .current_dir(dir.path())
        .args(["-j", fixture("minimal_notice.json").to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert_pdf(&dir.path().join("convocatoria_reunion_m-min.pdf"));
}

#[test]
fn test_malformed_json_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notice.pdf");

    let result = run_with_stdin(
        &["--json-file", "-", "--output", output.to_str().unwrap()],
        b"{\"meeting\": ",
    );

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid meeting record"), "{}", stderr);
}

#[test]
fn test_missing_field_fails_and_names_it() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notice.pdf");
    let record = br#"{"id": "m1", "community_id": "c1", "title": "Junta"}"#;

    let result = run_with_stdin(&["-j", "-", "-o", output.to_str().unwrap()], record);

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Missing required field: meeting_type"), "{}", stderr);
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    let result = notice_cli()
        .current_dir(dir.path())
        .args(["-j", "does-not-exist.json"])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_template_dir_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notice.pdf");

    let status = notice_cli()
        .args(["-j", fixture("minimal_notice.json").to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .args(["--template-dir", dir.path().join("none").to_str().unwrap()])
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}

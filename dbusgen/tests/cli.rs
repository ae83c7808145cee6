//! Command line tests running the built `dbusgen` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn testdata(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "testdata", name]
        .iter()
        .collect()
}

fn dbusgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dbusgen"))
}

fn run(args: &[&str]) -> Output {
    dbusgen().args(args).output().expect("failed to run dbusgen")
}

#[test]
fn test_generates_to_stdout() {
    let path = testdata("org.freedesktop.DBus.xml");
    let output = run(&["--package", "bus", path.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("// Code generated by dbusgen. DO NOT EDIT.\n\npackage bus\n"));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_reads_stdin_without_paths() {
    let mut child = dbusgen()
        .args(["--client-only", "--camelize"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"<node><interface name="org.example.Echo"><method name="Ping"/></interface></node>"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("type OrgExampleEcho struct {\n"));
    assert!(!stdout.contains("introspect"));
}

#[test]
fn test_conflicting_modes_fail() {
    let path = testdata("org.freedesktop.DBus.xml");
    let output = run(&["--client-only", "--server-only", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("mutually exclusive"));
}

#[test]
fn test_comma_separated_lists() {
    let dbus = testdata("org.freedesktop.DBus.xml");
    let fragment = testdata("fragment.xml");
    let output = run(&[
        "--only",
        "org.example.Echo,,org.freedesktop.DBus.Peer",
        "--prefix",
        "org.example,org.freedesktop.DBus",
        dbus.to_str().unwrap(),
        fragment.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("type Echo struct {\n"));
    assert!(stdout.contains("type Peer struct {\n"));
    assert!(!stdout.contains("Introspectable"));
}

#[test]
fn test_xml_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("combined.xml");
    let dbus = testdata("org.freedesktop.DBus.xml");
    let fragment = testdata("fragment.xml");
    let output = run(&[
        "--xml",
        "--except",
        "org.freedesktop.DBus",
        "-o",
        target.to_str().unwrap(),
        dbus.to_str().unwrap(),
        fragment.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let xml = std::fs::read_to_string(&target).unwrap();
    assert!(xml.starts_with("<!DOCTYPE node PUBLIC"));
    assert!(xml.contains("<interface name=\"org.freedesktop.DBus.Peer\">"));
    assert!(xml.contains("<interface name=\"org.example.Echo\">"));
    assert!(!xml.contains("<interface name=\"org.freedesktop.DBus\">"));
    assert!(!xml.contains("Shadowed"));
}

#[test]
fn test_invalid_signature_reports_location() {
    let path = testdata("broken-signature.xml");
    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("method Lookup / arg table"));
}

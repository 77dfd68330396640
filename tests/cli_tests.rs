//! CLI tests: run the file2bin binary and check stdout, stderr and exit status.

use std::path::Path;
use std::process::{Command, Output};

fn file2bin(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_file2bin"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Blob on stdout, sizes on stderr.
#[test]
fn cli_packs_little_endian_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [0x01, 0x02, 0x03]).unwrap();

    let out = file2bin(&["--little-endian", "a"], dir.path());
    assert!(out.status.success());
    assert_eq!(out.stdout, vec![0x04, 0, 0, 0, 0x01, 0x02, 0x03, 0x00]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("size: 3, padding: 1, total: 4"), "{}", stderr);
}

#[test]
fn cli_toc_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [1, 2, 3, 4]).unwrap();
    std::fs::write(dir.path().join("b"), [5]).unwrap();

    let out = file2bin(&["-t", "a", "b"], dir.path());
    assert!(out.status.success());
    assert_eq!(
        out.stdout,
        vec![0, 0, 0, 20, 0, 0, 0, 2, 0, 0, 0, 12, 0, 0, 0, 16, 1, 2, 3, 4, 5, 0, 0, 0]
    );
}

/// Missing input: non-zero exit, nothing on stdout, path in the message.
#[test]
fn cli_missing_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("present"), [1]).unwrap();

    let out = file2bin(&["present", "missing.bin"], dir.path());
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing.bin"), "{}", stderr);
}

/// Planner failure does not create the --output file.
#[test]
fn cli_missing_file_does_not_create_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = file2bin(&["-o", "blob.bin", "missing.bin"], dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("blob.bin").exists());
}

#[test]
fn cli_output_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), b"abcde").unwrap();

    let out = file2bin(&["-q", "-o", "blob.bin", "a"], dir.path());
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(out.stderr.is_empty());
    let blob = std::fs::read(dir.path().join("blob.bin")).unwrap();
    assert_eq!(blob, vec![0, 0, 0, 8, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]);
}

#[test]
fn cli_help_exits_zero_without_output_blob() {
    let dir = tempfile::tempdir().unwrap();
    let out = file2bin(&["--help"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--toc"), "{}", stdout);
}

#[test]
fn cli_requires_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let out = file2bin(&[], dir.path());
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_toc_conflicts_with_little_endian() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [1]).unwrap();
    let out = file2bin(&["--toc", "--little-endian", "a"], dir.path());
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_max_size_override() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [0u8; 9]).unwrap();
    let out = file2bin(&["--max-size", "8", "a"], dir.path());
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("too big"), "{}", stderr);
}

#[test]
fn cli_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [7u8; 2]).unwrap();
    std::fs::write(dir.path().join("pack.toml"), "byte_order = \"little\"\n").unwrap();

    let out = file2bin(&["-q", "--config", "pack.toml", "a"], dir.path());
    assert!(out.status.success());
    assert_eq!(out.stdout, vec![4, 0, 0, 0, 7, 7, 0, 0]);
}

/// Naming an input as --output is refused and the input is left intact.
#[test]
fn cli_output_same_as_input_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), b"precious").unwrap();

    let out = file2bin(&["-q", "-o", "a", "a"], dir.path());
    assert!(!out.status.success());
    assert_eq!(std::fs::read(dir.path().join("a")).unwrap(), b"precious");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("also an input"), "{}", stderr);
}

/// Same file reached through a different spelling of the path.
#[test]
fn cli_output_alias_through_other_path_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub/a"), b"keep").unwrap();

    let out = file2bin(&["-q", "-o", "./sub/../sub/a", "sub/a"], dir.path());
    assert!(!out.status.success());
    assert_eq!(std::fs::read(dir.path().join("sub/a")).unwrap(), b"keep");
}

/// An existing --output file is replaced with the complete blob.
#[test]
fn cli_output_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [9u8; 4]).unwrap();
    std::fs::write(dir.path().join("blob.bin"), b"stale contents").unwrap();

    let out = file2bin(&["-q", "-o", "blob.bin", "a"], dir.path());
    assert!(out.status.success());
    let blob = std::fs::read(dir.path().join("blob.bin")).unwrap();
    assert_eq!(blob, vec![0, 0, 0, 4, 9, 9, 9, 9]);
}

/// The header byte order is reported on stderr.
#[test]
fn cli_reports_header_byte_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [1]).unwrap();

    let big = file2bin(&["a"], dir.path());
    assert!(String::from_utf8_lossy(&big.stderr).contains("Header: 4 bytes, big-endian"));

    let little = file2bin(&["-l", "a"], dir.path());
    let stderr = String::from_utf8_lossy(&little.stderr);
    assert!(stderr.contains("Header: 4 bytes, little-endian"), "{}", stderr);
}

#[test]
fn cli_json_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), [1]).unwrap();

    let out = file2bin(&["--diag-format", "json", "a"], dir.path());
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("\"byte_order\":\"big\""), "{}", stderr);
}

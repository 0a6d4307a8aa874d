//! Runs the `vmmgr` binary and checks exit codes and report output

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn vmmgr(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vmmgr"))
        .current_dir(dir.path())
        .args(args)
        .output()
        .unwrap()
}

fn setup(store: Vec<u8>, addresses: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("BACKING_STORE.bin"), store).unwrap();
    fs::write(dir.path().join("addresses.txt"), addresses).unwrap();
    dir
}

fn full_store() -> Vec<u8> {
    let mut data = vec![0u8; 256 * 256];
    data[0] = 1;
    data[66 * 256 + 20] = 0xF6; // -10
    data
}

#[test]
fn test_no_arguments_is_usage_error() {
    let dir = setup(full_store(), "");
    let out = vmmgr(&dir, &[]);

    assert_eq!(out.status.code(), Some(255));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Usage"));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    let dir = setup(full_store(), "");
    let out = vmmgr(&dir, &["addresses.txt", "extra"]);
    assert_eq!(out.status.code(), Some(255));
    // the diagnostic names the offending argument
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("extra"));
}

#[test]
fn test_tlb_entries_option() {
    let dir = setup(full_store(), "0\n256\n1\n");
    let out = vmmgr(&dir, &["--tlb-entries", "1", "--stats", "addresses.txt"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    // a single entry TLB forgets page 0 once page 1 is loaded
    assert!(stdout.contains("TLB hits: 0"));
    assert!(stdout.contains("Page table hits: 1"));
}

#[test]
fn test_tlb_entries_out_of_range() {
    let dir = setup(full_store(), "0\n");
    for bad in ["0", "257"] {
        let out = vmmgr(&dir, &["-t", bad, "addresses.txt"]);
        assert_eq!(out.status.code(), Some(255));
    }
}

#[test]
fn test_report_blocks() {
    let dir = setup(full_store(), "0\n16916\n");
    let out = vmmgr(&dir, &["addresses.txt"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected = "---------------------------\n\n\
                    Logical Address: 0\n\
                    Physical Address: 0\n\
                    Signed Byte: 1\n\
                    page: 0\n\
                    offset: 0\n\
                    ---------------------------\n\n\
                    ---------------------------\n\n\
                    Logical Address: 16916\n\
                    Physical Address: 16916\n\
                    Signed Byte: -10\n\
                    page: 66\n\
                    offset: 20\n\
                    ---------------------------\n\n";
    assert_eq!(stdout, expected);
}

#[test]
fn test_missing_address_file() {
    let dir = setup(full_store(), "");
    let out = vmmgr(&dir, &["nope.txt"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("nope.txt"));
}

#[test]
fn test_missing_backing_store() {
    let dir = setup(full_store(), "0\n");
    let out = vmmgr(&dir, &["-b", "missing.bin", "addresses.txt"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("missing.bin"));
}

#[test]
fn test_truncated_backing_store_aborts() {
    let dir = setup(vec![5u8; 100], "16916\n");
    let out = vmmgr(&dir, &["addresses.txt"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("page 66"));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_stats_and_page_table_dump() {
    let dir = setup(full_store(), "0\n1\n256\n");
    let out = vmmgr(&dir, &["--stats", "--dump-page-table", "addresses.txt"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\n0 0\n"));
    assert!(stdout.contains("\n1 1\n"));
    assert!(stdout.contains("\n2 -1\n"));
    assert!(stdout.contains("Page faults: 2"));
    assert!(stdout.contains("TLB hits: 1"));
}

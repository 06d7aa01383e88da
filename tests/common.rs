#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn flg() -> Command {
    let mut cmd = cargo_bin_cmd!("fieldlogger");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldlogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{db_path}{suffix}")).ok();
    }
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB in test mode (default buttons included)
pub fn init_db(db_path: &str) {
    flg()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Tap each code once, in order
pub fn tap_codes(db_path: &str, codes: &[i32]) {
    for code in codes {
        flg()
            .args(["--db", db_path, "tap", &code.to_string()])
            .assert()
            .success();
    }
}

/// Events as returned by `list --json`
pub fn list_json(db_path: &str) -> Vec<serde_json::Value> {
    let out = flg()
        .args(["--db", db_path, "list", "--json"])
        .output()
        .expect("failed to run list --json");
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).expect("list --json is not valid JSON")
}

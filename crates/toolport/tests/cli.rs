// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-level behavior of the `toolport` binary.

use std::io::Write;
use std::process::{Command, Output};

fn toolport(args: &[&str], dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toolport"))
        .args(args)
        .current_dir(dir)
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("failed to run toolport")
}

fn config_file(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("custom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn check_config_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(
        &dir,
        "[image]\nmax_dimension = 512\n\n[weather]\nforecast_periods = 3\n",
    );

    let output = toolport(&["--config", path.to_str().unwrap(), "check-config"], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("configuration is valid"));
    assert!(stdout.contains("image.max_dimension    = 512"));
}

#[test]
fn check_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(&dir, "[weather]\nforcast_periods = 3\n");

    let output = toolport(&["--config", path.to_str().unwrap(), "check-config"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn check_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(&dir, "[image]\njpeg_quality = 20\nmin_quality = 40\n");

    let output = toolport(&["--config", path.to_str().unwrap(), "check-config"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn image_server_without_api_key_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_file(&dir, "");

    let output = toolport(&["--config", path.to_str().unwrap(), "image"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout must stay clean for MCP");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key not found"), "stderr: {stderr}");
}

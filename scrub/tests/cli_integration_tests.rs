// scrub/tests/cli_integration_tests.rs
//! Command-line integration tests for the `scrub` binary.
//!
//! These tests execute the real executable with `assert_cmd`, feeding input
//! via stdin or temporary files and asserting on stdout/stderr. Sanitized
//! text goes to stdout; logs and the redaction summary go to stderr, so the
//! two streams are asserted independently.

use anyhow::Result;
#[allow(unused_imports)]
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(unused_imports)]
use assert_cmd::prelude::*;
use assert_cmd::Command;

/// Helper to run the `scrub` binary with the given stdin input and arguments.
fn run_scrub(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("scrub").unwrap();
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

#[test]
fn test_basic_sanitization_from_stdin() -> Result<()> {
    let input = "My email is test@example.com and my IP is 192.168.1.1.";
    let assert = run_scrub(input, &["sanitize"]).success();

    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout, "My email is [EMAIL_REDACTED] and my IP is [PRIVATE_IP_REDACTED].\n");
    assert!(stderr.contains("--- Redaction Summary ---"));
    assert!(stderr.contains("email (1 occurrences)"));
    assert!(stderr.contains("private_ipv4 (1 occurrences)"));
    Ok(())
}

#[test]
fn test_clean_input_passes_through() -> Result<()> {
    run_scrub("hello world", &["sanitize"])
        .success()
        .stdout("hello world\n");
    Ok(())
}

#[test]
fn test_summary_can_be_suppressed() -> Result<()> {
    let assert = run_scrub("a@b.io", &["sanitize", "--no-redaction-summary"]).success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(!stderr.contains("--- Redaction Summary ---"));
    Ok(())
}

#[test]
fn test_file_input_and_output() -> Result<()> {
    let mut input_file = NamedTempFile::new()?;
    input_file.write_all(b"password=hunter2\n")?;
    let output_file = NamedTempFile::new()?;

    run_scrub(
        "",
        &[
            "sanitize",
            "-i",
            input_file.path().to_str().unwrap(),
            "-o",
            output_file.path().to_str().unwrap(),
        ],
    )
    .success();

    let written = fs::read_to_string(output_file.path())?;
    assert_eq!(written, "password=[PASSWORD_REDACTED]\n\n");
    Ok(())
}

#[test]
fn test_missing_input_file_is_reported() -> Result<()> {
    let assert = run_scrub("", &["sanitize", "-i", "/nonexistent/path/to/input.txt"]).failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Failed to read input file"));
    Ok(())
}

#[test]
fn test_disable_rule_leaves_its_matches_alone() -> Result<()> {
    run_scrub("a@b.io", &["sanitize", "-x", "email"])
        .success()
        .stdout("a@b.io\n");
    Ok(())
}

#[test]
fn test_custom_config_adds_and_overrides_rules() -> Result<()> {
    let yaml = r#"
rules:
  - name: badge
    pattern: 'EMP-\d+'
    replace_with: "[BADGE_REDACTED]"
    priority: 5
  - name: email
    pattern: '\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b'
    replace_with: "[MAIL]"
    priority: 41
"#;
    let mut config_file = NamedTempFile::new()?;
    config_file.write_all(yaml.as_bytes())?;

    run_scrub(
        "badge EMP-42 mail m@x.io",
        &["sanitize", "--config", config_file.path().to_str().unwrap()],
    )
    .success()
    .stdout("badge [BADGE_REDACTED] mail [MAIL]\n");
    Ok(())
}

#[test]
fn test_line_buffered_mode_sanitizes_each_line() -> Result<()> {
    let input = "password=hunter2\napi_key=zzz123\nplain line\n";
    run_scrub(input, &["sanitize", "--line-buffered"])
        .success()
        .stdout("password=[PASSWORD_REDACTED]\napi_key=[API_KEY_REDACTED]\nplain line\n");
    Ok(())
}

#[test]
fn test_ansi_escapes_are_stripped_before_matching() -> Result<()> {
    let input = "\u{1b}[31mpassword=hunter2\u{1b}[0m";
    run_scrub(input, &["sanitize", "--no-redaction-summary"])
        .success()
        .stdout("password=[PASSWORD_REDACTED]\n");
    Ok(())
}

#[test]
fn test_scan_json_stdout_reports_counts_without_secrets() -> Result<()> {
    let assert = run_scrub("reach me at test@example.com", &["scan", "--json-stdout"]).success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);

    assert!(!stdout.contains("test@example.com"));

    let report: serde_json::Value = serde_json::from_str(&stdout)?;
    let items = report.as_array().expect("report is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["rule_name"], "email");
    assert_eq!(items[0]["occurrences"], 1);
    assert_eq!(items[0]["sample_hashes"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_scan_json_file_export() -> Result<()> {
    let json_file = NamedTempFile::new()?;
    run_scrub(
        "password=hunter2",
        &["scan", "--json-file", json_file.path().to_str().unwrap()],
    )
    .success();

    let written = fs::read_to_string(json_file.path())?;
    let report: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(report[0]["rule_name"], "password");
    assert!(!written.contains("hunter2"));
    Ok(())
}

#[test]
fn test_scan_console_summary_and_samples_are_redacted() -> Result<()> {
    let assert = run_scrub(
        "password=supersecretvalue",
        &["scan", "--sample-matches", "3"],
    )
    .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);

    assert!(stderr.contains("--- Scan Summary ---"));
    assert!(stderr.contains("password (1 occurrences)"));
    assert!(stderr.contains("sample: [REDACTED"));
    assert!(!stderr.contains("supersecretvalue"));
    assert!(stderr.contains("Total: 1 detection(s)"));
    Ok(())
}

#[test]
fn test_scan_fail_over_threshold_exits_nonzero() -> Result<()> {
    let assert = run_scrub("password=hunter2", &["scan", "--fail-over-threshold", "0"]).failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("exceeding the threshold"));
    Ok(())
}

#[test]
fn test_scan_clean_input_reports_nothing_detected() -> Result<()> {
    let assert = run_scrub("nothing to see here", &["scan"]).success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("No sensitive data detected."));
    Ok(())
}

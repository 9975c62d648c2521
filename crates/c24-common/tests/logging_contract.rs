//! Contract Test: Logging Bootstrap
//!
//! Constraints verified:
//! - The log directory is created on demand, once
//! - The file is named `<name>.log.DD_MM.HH_MM.csv`
//! - The first line is a plain header with no placeholder punctuation
//! - Every later line splits into exactly seven tab-separated fields
//! - The debug flag decides whether debug records reach the file
//! - Without the flag, the Defaults table's `log_level` decides
//! - The call-site column holds the emitting module path

use c24_common::Defaults;
use c24_common::logging::{self, Logger};
use std::fs;
use tempfile::TempDir;
use tracing::{debug, info, warn};

fn read_lines(logger: &Logger) -> Vec<String> {
    fs::read_to_string(logger.log_file())
        .expect("log file readable")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn bootstrap_twice_creates_directory_once() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("logs");
    assert!(!dir.exists());

    let first = logging::initialize("twice", &dir, false).expect("first bootstrap");
    assert!(dir.is_dir());

    let second = logging::initialize("twice", &dir, false).expect("second bootstrap");
    assert!(dir.is_dir());
    assert_eq!(first.log_file().parent(), second.log_file().parent());
}

#[test]
fn log_file_follows_naming_convention() {
    let temp = TempDir::new().unwrap();
    let logger = logging::initialize("c24d", temp.path(), false).unwrap();

    let file_name = logger
        .log_file()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();

    // c24d.log.DD_MM.HH_MM.csv
    let stamp = file_name
        .strip_prefix("c24d.log.")
        .and_then(|rest| rest.strip_suffix(".csv"))
        .expect("prefix and suffix");
    let parts: Vec<&str> = stamp.split(['.', '_']).collect();
    assert_eq!(parts.len(), 4, "stamp {}", stamp);
    assert!(parts.iter().all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit())));
}

#[test]
fn header_then_seven_field_records() {
    let temp = TempDir::new().unwrap();
    let logger = logging::initialize("fields", temp.path(), false).unwrap();

    logger.in_scope(|| {
        info!("daemon listening on {}", "10.0.0.5:9123");
        warn!(port = 9124, "message with\ta tab\nand a newline");
        info!(peer = "surface", "(parenthesised) 100% $ok");
    });

    let lines = read_lines(&logger);
    assert_eq!(lines.len(), 4, "header plus three records: {:?}", lines);

    let header = &lines[0];
    assert!(!header.contains(['%', '$', '(', ')']), "header {:?}", header);
    assert_eq!(header.split('\t').count(), 7);

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 7, "line {:?}", line);
        assert_eq!(fields[1], "fields");
        assert!(fields[5].parse::<u32>().unwrap() > 0);
    }

    assert_eq!(lines[1].split('\t').nth(2), Some("INFO"));
    assert!(lines[1].ends_with("daemon listening on 10.0.0.5:9123"));
    assert_eq!(lines[2].split('\t').nth(2), Some("WARN"));
    assert!(lines[2].ends_with("message with a tab and a newline port=9124"));
    assert!(lines[3].ends_with("(parenthesised) 100% $ok peer=surface"));
}

#[test]
fn info_level_drops_debug_records() {
    let temp = TempDir::new().unwrap();
    let logger = logging::initialize("quiet", temp.path(), false).unwrap();

    logger.in_scope(|| {
        debug!("not written");
        info!("written");
    });

    let lines = read_lines(&logger);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("written"));
}

#[test]
fn table_level_drops_records_below_it() {
    let temp = TempDir::new().unwrap();
    let defaults = Defaults::from_json_str(r#"{"log_level": "warn"}"#).unwrap();
    let logger = logging::initialize_with("terse", temp.path(), false, &defaults).unwrap();

    logger.in_scope(|| {
        info!("not written");
        warn!("fader overload");
    });

    let lines = read_lines(&logger);
    assert_eq!(lines.len(), 2, "header plus one record: {:?}", lines);
    assert!(lines[1].ends_with("fader overload"));
}

#[test]
fn debug_flag_overrides_table_level() {
    let temp = TempDir::new().unwrap();
    let defaults = Defaults::from_json_str(r#"{"log_level": "error"}"#).unwrap();
    let logger = logging::initialize_with("loud", temp.path(), true, &defaults).unwrap();

    logger.in_scope(|| debug!("kept"));

    let lines = read_lines(&logger);
    assert!(lines.iter().skip(1).any(|l| l.ends_with("kept")));
}

#[test]
fn call_site_column_is_module_path() {
    let temp = TempDir::new().unwrap();
    let logger = logging::initialize("site", temp.path(), false).unwrap();

    logger.in_scope(|| info!("where am I"));

    let lines = read_lines(&logger);
    let fields: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(fields[4], module_path!());
    assert_eq!(fields[4], "logging_contract");
}

#[test]
fn debug_flag_keeps_debug_records() {
    let temp = TempDir::new().unwrap();
    let logger = logging::initialize("chatty", temp.path().join("fresh"), true).unwrap();

    logger.in_scope(|| debug!("surface detail"));

    let lines = read_lines(&logger);
    assert!(lines.iter().skip(1).any(|l| l.ends_with("surface detail")));
    assert!(lines.iter().skip(1).all(|l| l.split('\t').count() == 7));
}

#[test]
fn unwritable_parent_is_a_bootstrap_failure() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, b"file, not a directory").unwrap();

    let err = logging::initialize("blocked", blocker.join("logs"), false).unwrap_err();
    assert!(err.is_bootstrap(), "unexpected {err}");
}

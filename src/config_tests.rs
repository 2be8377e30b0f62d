#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

// ── Defaults ──────────────────────────────────────────────────

#[test]
fn test_defaults() {
    let (config, rest) = Config::resolve(no_env, &[]).unwrap();
    assert_eq!(config.start, ym(DEFAULT_START));
    assert_eq!(config.end, ym(DEFAULT_END));
    assert!(config.log_file.is_none());
    assert!(rest.is_empty());
}

// ── Precedence ────────────────────────────────────────────────

#[test]
fn test_env_overrides_defaults() {
    let env: HashMap<&str, &str> = [("BUDGETGRID_START", "2023-06"), ("BUDGETGRID_END", "2023-09")]
        .into_iter()
        .collect();
    let (config, _) = Config::resolve(|k| env.get(k).map(|v| v.to_string()), &[]).unwrap();
    assert_eq!(config.start, ym("2023-06"));
    assert_eq!(config.end, ym("2023-09"));
}

#[test]
fn test_flags_override_env() {
    let env: HashMap<&str, &str> = [("BUDGETGRID_START", "2023-06")].into_iter().collect();
    let (config, rest) = Config::resolve(
        |k| env.get(k).map(|v| v.to_string()),
        &args(&["--start", "2024-03", "--end", "2024-05", "summary"]),
    )
    .unwrap();
    assert_eq!(config.start, ym("2024-03"));
    assert_eq!(config.end, ym("2024-05"));
    assert_eq!(rest, args(&["summary"]));
}

#[test]
fn test_positional_args_preserved_in_order() {
    let (_, rest) = Config::resolve(no_env, &args(&["months", "2024-01", "2024-03"])).unwrap();
    assert_eq!(rest, args(&["months", "2024-01", "2024-03"]));
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn test_inverted_range_rejected() {
    let err = Config::resolve(no_env, &args(&["--start", "2024-06", "--end", "2024-01"])).unwrap_err();
    assert!(err.to_string().contains("before start month"));
}

#[test]
fn test_bad_month_rejected() {
    assert!(Config::resolve(no_env, &args(&["--start", "2024-13"])).is_err());
    assert!(Config::resolve(|_| Some("nope".into()), &[]).is_err());
}

#[test]
fn test_missing_flag_value() {
    let err = Config::resolve(no_env, &args(&["--end"])).unwrap_err();
    assert!(err.to_string().contains("Missing value for --end"));
}

// ── Log file ──────────────────────────────────────────────────

#[test]
fn test_log_flag_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.log");
    let (config, _) =
        Config::resolve(no_env, &args(&["--log", path.to_str().unwrap()])).unwrap();
    assert_eq!(config.log_file, Some(path));
}

#[test]
fn test_blank_log_env_ignored() {
    let (config, _) = Config::resolve(
        |k| (k == "BUDGETGRID_LOG").then(|| "  ".to_string()),
        &[],
    )
    .unwrap();
    assert!(config.log_file.is_none());
}

#[test]
fn test_shellexpand_plain_path() {
    assert_eq!(shellexpand("/tmp/x.log"), "/tmp/x.log");
    assert!(!shellexpand("~/x.log").starts_with('~'));
}

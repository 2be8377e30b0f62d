use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::{validate_range, YearMonth};

pub(crate) const DEFAULT_START: &str = "2024-01";
pub(crate) const DEFAULT_END: &str = "2024-12";

const ENV_START: &str = "BUDGETGRID_START";
const ENV_END: &str = "BUDGETGRID_END";
const ENV_LOG: &str = "BUDGETGRID_LOG";

/// Value of `--log` / `BUDGETGRID_LOG` that selects the platform data dir.
const DEFAULT_LOG_KEYWORD: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) start: YearMonth,
    pub(crate) end: YearMonth,
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: YearMonth {
                year: 2024,
                month: 1,
            },
            end: YearMonth {
                year: 2024,
                month: 12,
            },
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults, then the process environment, then `args` flags.
    ///
    /// Returns the config and the arguments left after removing the flags.
    pub(crate) fn load(args: &[String]) -> Result<(Self, Vec<String>)> {
        Self::resolve(|key| std::env::var(key).ok(), args)
    }

    pub(crate) fn resolve(
        env: impl Fn(&str) -> Option<String>,
        args: &[String],
    ) -> Result<(Self, Vec<String>)> {
        let mut config = Self::default();

        if let Some(v) = env(ENV_START) {
            config.start = v.parse().with_context(|| format!("Invalid {ENV_START}"))?;
        }
        if let Some(v) = env(ENV_END) {
            config.end = v.parse().with_context(|| format!("Invalid {ENV_END}"))?;
        }
        if let Some(v) = env(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_file = Some(resolve_log_path(&v)?);
        }

        let mut rest = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--start" | "--end" | "--log" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("Missing value for {arg}"))?;
                    match arg.as_str() {
                        "--start" => {
                            config.start = value
                                .parse()
                                .with_context(|| format!("Invalid --start '{value}'"))?;
                        }
                        "--end" => {
                            config.end = value
                                .parse()
                                .with_context(|| format!("Invalid --end '{value}'"))?;
                        }
                        _ => config.log_file = Some(resolve_log_path(value)?),
                    }
                }
                _ => rest.push(arg.clone()),
            }
        }

        validate_range(config.start, config.end)?;
        Ok((config, rest))
    }
}

fn resolve_log_path(value: &str) -> Result<PathBuf> {
    if value != DEFAULT_LOG_KEYWORD {
        return Ok(PathBuf::from(shellexpand(value)));
    }
    let proj_dirs = directories::ProjectDirs::from("com", "budgetgrid", "BudgetGrid")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("budgetgrid.log"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

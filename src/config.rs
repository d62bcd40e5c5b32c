use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::analytics::DEFAULT_WINDOW_MONTHS;

pub const DB_ENV: &str = "BUDGETWISE_DB";
pub const TREND_MONTHS_ENV: &str = "BUDGETWISE_TREND_MONTHS";
pub const MAX_TREND_MONTHS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Months shown by the trend report, ending at the current month.
    pub trend_months: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var(DB_ENV).ok(),
            std::env::var(TREND_MONTHS_ENV).ok(),
        )
    }

    fn resolve(db_path: Option<String>, trend_months: Option<String>) -> Result<Self> {
        let db_path = match db_path.filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let trend_months = match trend_months {
            Some(raw) => parse_trend_months(&raw)?,
            None => DEFAULT_WINDOW_MONTHS,
        };
        Ok(Self {
            db_path,
            trend_months,
        })
    }
}

fn parse_trend_months(raw: &str) -> Result<u32> {
    let months: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{TREND_MONTHS_ENV} must be a whole number, got {raw:?}"))?;
    if !(1..=MAX_TREND_MONTHS).contains(&months) {
        anyhow::bail!("{TREND_MONTHS_ENV} must be between 1 and {MAX_TREND_MONTHS}, got {months}");
    }
    Ok(months)
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetwise", "Budgetwise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("budgetwise.db"))
}

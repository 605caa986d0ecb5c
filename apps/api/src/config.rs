use std::str::FromStr;

use anyhow::{Context, Result};

use crate::ats::vocabulary::ScoringSettings;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub scoring: ScoringSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ScoringSettings::default();
        let scoring = ScoringSettings {
            page_width_estimate: parse_or(
                &lookup,
                "ATS_PAGE_WIDTH_ESTIMATE",
                defaults.page_width_estimate,
            )?,
            density_dense_threshold: parse_or(
                &lookup,
                "ATS_DENSITY_DENSE_THRESHOLD",
                defaults.density_dense_threshold,
            )?,
            density_sparse_threshold: parse_or(
                &lookup,
                "ATS_DENSITY_SPARSE_THRESHOLD",
                defaults.density_sparse_threshold,
            )?,
            ..defaults
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            scoring,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

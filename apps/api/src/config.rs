use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

use crate::scoring::experience::YearClock;
use crate::scoring::keywords::DEFAULT_FUZZY_THRESHOLD;
use crate::scoring::ScoringOptions;

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// JSON file with extra or replacement job profiles.
    pub profiles_path: Option<PathBuf>,
    pub scoring: ScoringOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            profiles_path: None,
            scoring: ScoringOptions::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let fuzzy_enabled: bool = parse_var(&lookup, "ATS_FUZZY_MATCHING", false)?;
        let fuzzy_threshold: f64 =
            parse_var(&lookup, "ATS_FUZZY_THRESHOLD", DEFAULT_FUZZY_THRESHOLD)?;
        if !(0.0..=1.0).contains(&fuzzy_threshold) {
            bail!("ATS_FUZZY_THRESHOLD must be between 0 and 1, got {fuzzy_threshold}");
        }

        let keyword_sample: usize =
            parse_var(&lookup, "ATS_KEYWORD_SAMPLE", defaults.scoring.keyword_sample)?;
        if keyword_sample == 0 {
            bail!("ATS_KEYWORD_SAMPLE must be at least 1");
        }

        // Pins "present" in date ranges; the system clock is used when unset.
        let clock = match lookup("ATS_CURRENT_YEAR").filter(|v| !v.trim().is_empty()) {
            Some(_) => {
                let year: i32 = parse_var(&lookup, "ATS_CURRENT_YEAR", 0)?;
                if !(1900..=2999).contains(&year) {
                    bail!("ATS_CURRENT_YEAR must be a four-digit year, got {year}");
                }
                YearClock::Fixed(year)
            }
            None => defaults.scoring.clock,
        };

        let scoring = ScoringOptions {
            normalization: parse_var(&lookup, "ATS_NORMALIZATION", defaults.scoring.normalization)?,
            bounds: parse_var(&lookup, "ATS_SCORE_BOUNDS", defaults.scoring.bounds)?,
            fuzzy_threshold: fuzzy_enabled.then_some(fuzzy_threshold),
            experience_cap: parse_var(
                &lookup,
                "ATS_EXPERIENCE_CAP",
                defaults.scoring.experience_cap,
            )?,
            keyword_sample,
            clock,
        };

        Ok(Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            profiles_path: lookup("ATS_PROFILES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            scoring,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        _ => Ok(default),
    }
}

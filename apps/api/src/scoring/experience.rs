//! Experience extraction — estimates years of work history from date ranges.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::scoring::models::ExperienceEstimate;

pub const DEFAULT_EXPERIENCE_CAP: u32 = 30;

/// Source of the "current year" used for open-ended ranges ("2019 - present").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearClock {
    #[default]
    System,
    Fixed(i32),
}

impl YearClock {
    pub fn current_year(&self) -> i32 {
        match self {
            YearClock::System => Utc::now().year(),
            YearClock::Fixed(year) => *year,
        }
    }
}

// start: 4-digit year or '08 shorthand (straight or curly apostrophe); end may carry a month name.
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<start>\b(?:19|20)\d{2}\b|['‘’]\d{2}\b)[ \t]*[-–—][ \t]*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?(?P<end>\b(?:19|20)\d{2}\b|['‘’]\d{2}\b|\bpresent\b|\bcurrent\b|\bnow\b)",
    )
    .expect("date range pattern is valid")
});

static YEARS_OF_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<years>\d{1,2})\+?\s*(?:years?|yrs?)(?:\s+of)?\s+(?:\w+\s+)?experience")
        .expect("years of experience pattern is valid")
});

/// Sums the durations of every valid date range in `text`, capped at `cap` years.
///
/// Ranges that end before they start, or start after the current year, are skipped.
/// End years beyond the current year are clamped to it. When no range is found, the
/// largest "N years of experience" claim is used instead.
pub fn extract_experience(text: &str, current_year: i32, cap: u32) -> ExperienceEstimate {
    let mut total_years = 0u32;
    let mut positions = 0u32;

    for caps in DATE_RANGE.captures_iter(text) {
        let start = parse_year(&caps["start"], current_year);
        let end = parse_year(&caps["end"], current_year).map(|y| y.min(current_year));

        match (start, end) {
            (Some(start), Some(end)) if start <= end => {
                total_years = total_years.saturating_add((end - start) as u32);
                positions += 1;
            }
            _ => {
                debug!(range = &caps[0], "Skipping malformed date range");
            }
        }
    }

    if positions == 0 {
        total_years = YEARS_OF_EXPERIENCE
            .captures_iter(text)
            .filter_map(|c| c["years"].parse::<u32>().ok())
            .max()
            .unwrap_or(0);
    }

    ExperienceEstimate {
        total_years: total_years.min(cap),
        positions,
    }
}

fn parse_year(token: &str, current_year: i32) -> Option<i32> {
    let token = token.trim().to_lowercase();
    match token.as_str() {
        "present" | "current" | "now" => Some(current_year),
        t => match t.strip_prefix(is_apostrophe) {
            Some(yy) => yy.parse::<i32>().ok().map(|yy| 2000 + yy),
            None => t.parse::<i32>().ok(),
        },
    }
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '‘' | '’')
}

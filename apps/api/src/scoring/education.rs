use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    /// Share of the education credit a degree of this level earns.
    pub fn weight(&self) -> f64 {
        match self {
            DegreeLevel::Associate => 0.5,
            DegreeLevel::Bachelor => 0.7,
            DegreeLevel::Master => 0.85,
            DegreeLevel::Doctorate => 1.0,
        }
    }
}

// Highest level first.
static DEGREE_PATTERNS: Lazy<Vec<(DegreeLevel, Regex)>> = Lazy::new(|| {
    [
        (DegreeLevel::Doctorate, r"\bph\.?\s?d\b|\bdoctorate\b|\bdoctor of\b"),
        (
            DegreeLevel::Master,
            r"\bmaster(?:'?s)?\b|\bm\.?sc\b|\bmba\b|\bm\.tech\b|\bm\.eng\b",
        ),
        (
            DegreeLevel::Bachelor,
            r"\bbachelor(?:'?s)?\b|\bb\.?sc\b|\bb\.tech\b|\bb\.s\.|\bb\.a\.|\bundergraduate\b",
        ),
        (
            DegreeLevel::Associate,
            r"\bassociate(?:'?s)? (?:degree|of)\b|\bdiploma\b",
        ),
    ]
    .into_iter()
    .map(|(level, pattern)| {
        let re = Regex::new(&format!("(?i){pattern}")).expect("degree pattern is valid");
        (level, re)
    })
    .collect()
});

/// Highest degree mentioned in `text`, if any.
pub fn highest_degree(text: &str) -> Option<DegreeLevel> {
    DEGREE_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(level, _)| *level)
}

//! Feedback — ordered, human-readable suggestions derived from the detector signals.
//!
//! Every rule is evaluated independently; output keeps rule order:
//! 1. missing required sections
//! 2. low coverage of the best-fit keyword category
//! 3. little work history
//! 4. few bullet points
//! 5. few quantified achievements

use crate::profiles::JobProfile;
use crate::scoring::models::{
    ExperienceEstimate, KeywordMatchResult, SectionLabel, SectionMap, StructuralMetrics,
};

const MIN_CATEGORY_COVERAGE: f64 = 0.5;
const MIN_EXPERIENCE_YEARS: u32 = 2;
const MIN_BULLET_POINTS: u32 = 3;
const MIN_NUMERIC_MENTIONS: u32 = 2;
const KEYWORD_SAMPLE: usize = 3;

pub fn missing_sections(profile: &JobProfile, sections: &SectionMap) -> Vec<SectionLabel> {
    profile
        .required_sections
        .iter()
        .filter(|label| !sections.contains(**label))
        .copied()
        .collect()
}

pub fn generate_feedback(
    profile: &JobProfile,
    sections: &SectionMap,
    keywords: &KeywordMatchResult,
    experience: &ExperienceEstimate,
    metrics: &StructuralMetrics,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    let missing = missing_sections(profile, sections);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(SectionLabel::as_str).collect();
        suggestions.push(format!("Add missing section(s): {}.", names.join(", ")));
    }

    if let Some(suggestion) = keyword_suggestion(profile, keywords) {
        suggestions.push(suggestion);
    }

    if experience.total_years < MIN_EXPERIENCE_YEARS {
        suggestions.push(
            "Limited work history detected. Emphasize projects, internships and volunteer work."
                .to_string(),
        );
    }

    if metrics.bullet_points < MIN_BULLET_POINTS {
        suggestions.push("Use more bullet points to make achievements easy to scan.".to_string());
    }

    if metrics.numeric_mentions < MIN_NUMERIC_MENTIONS {
        suggestions.push(
            "Add quantifiable achievements: dates, durations, percentages or revenue figures."
                .to_string(),
        );
    }

    suggestions
}

/// Targets the best-fit category, or the first one when nothing matched.
fn keyword_suggestion(profile: &JobProfile, keywords: &KeywordMatchResult) -> Option<String> {
    let target = keywords
        .industry
        .as_deref()
        .and_then(|name| keywords.category(name))
        .or_else(|| keywords.categories.first())?;

    if target.vocabulary == 0 || target.coverage() >= MIN_CATEGORY_COVERAGE {
        return None;
    }

    let vocabulary = profile
        .keyword_categories
        .iter()
        .find(|c| c.name == target.category)?;
    let sample: Vec<&str> = vocabulary
        .keywords
        .iter()
        .map(|kw| kw.trim())
        .filter(|kw| {
            !kw.is_empty() && !target.matched.iter().any(|m| m.eq_ignore_ascii_case(kw))
        })
        .take(KEYWORD_SAMPLE)
        .collect();

    Some(format!(
        "Add more {} keywords, e.g. {}.",
        target.category.replace('_', " "),
        sample.join(", ")
    ))
}

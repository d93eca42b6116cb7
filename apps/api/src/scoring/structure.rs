//! Structural analysis — formatting and content signals counted over the raw text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::models::StructuralMetrics;

const BULLET_GLYPHS: &[char] = &['-', '•', '●', '▪'];

/// Past-tense verbs that open strong achievement bullets.
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "automated",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "optimized",
    "reduced",
    "streamlined",
];

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern is valid"));

static YEARS_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}\+?\s*(?:years?|yrs?)\b").expect("years pattern is valid")
});

static ACTION_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = ACTION_VERBS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("verb pattern is valid")
});

pub fn analyze_structure(text: &str) -> StructuralMetrics {
    let bullet_points = text.chars().filter(|c| BULLET_GLYPHS.contains(c)).count();
    let numeric_mentions =
        YEAR_TOKEN.find_iter(text).count() + YEARS_PHRASE.find_iter(text).count();
    let action_verbs = ACTION_VERB_RE.find_iter(text).count();
    let word_count = text.split_whitespace().count();

    StructuralMetrics {
        bullet_points: bullet_points as u32,
        numeric_mentions: numeric_mentions as u32,
        action_verbs: action_verbs as u32,
        word_count: word_count as u32,
        paragraphs: count_paragraphs(text),
    }
}

/// Blank-line separated blocks of content; 0 for blank text.
fn count_paragraphs(text: &str) -> u32 {
    let mut paragraphs = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            paragraphs += 1;
            in_paragraph = true;
        }
    }
    paragraphs
}

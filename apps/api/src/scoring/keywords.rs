//! Keyword and industry matching against a profile's categorized vocabulary.
//!
//! Exact mode: case-insensitive substring match where both neighbours are
//! non-alphanumeric, so "c++", "ci/cd" and "power bi" match as written while
//! "go" does not match inside "google".
//!
//! Fuzzy mode (opt-in): additionally accepts a text token, or a run of tokens as
//! long as the keyword, whose normalized Levenshtein similarity reaches the
//! threshold. This tolerates typos and OCR noise at the cost of precision, so it
//! is off unless the deployment enables it. Keywords shorter than
//! `MIN_FUZZY_KEYWORD_LEN` are always matched exactly.

use std::collections::HashSet;

use strsim::normalized_levenshtein;

use crate::profiles::KeywordCategory;
use crate::scoring::models::{CategoryMatch, KeywordMatchResult};

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;
const MIN_FUZZY_KEYWORD_LEN: usize = 4;
const MIN_FUZZY_TOKEN_LEN: usize = 3;

/// Pre-processed resume text, reusable across many vocabularies.
pub struct KeywordMatcher {
    text_lower: String,
    tokens: Vec<String>,
    fuzzy_threshold: Option<f64>,
}

impl KeywordMatcher {
    pub fn new(text: &str, fuzzy_threshold: Option<f64>) -> Self {
        let text_lower = text.to_lowercase();
        let tokens = if fuzzy_threshold.is_some() {
            tokenize(&text_lower)
        } else {
            Vec::new()
        };
        Self {
            text_lower,
            tokens,
            fuzzy_threshold,
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return false;
        }
        if contains_word(&self.text_lower, &keyword) {
            return true;
        }
        match self.fuzzy_threshold {
            Some(threshold) if keyword.chars().count() >= MIN_FUZZY_KEYWORD_LEN => {
                self.fuzzy_contains(&keyword, threshold)
            }
            _ => false,
        }
    }

    fn fuzzy_contains(&self, keyword: &str, threshold: f64) -> bool {
        let width = keyword.split_whitespace().count().max(1);
        if self.tokens.len() < width {
            return false;
        }
        self.tokens.windows(width).any(|window| {
            let candidate = window.join(" ");
            candidate.chars().count() >= MIN_FUZZY_TOKEN_LEN
                && normalized_levenshtein(&candidate, keyword) >= threshold
        })
    }

    /// Matches every category; each keyword counts once per category.
    pub fn match_categories(&self, categories: &[KeywordCategory]) -> KeywordMatchResult {
        let categories: Vec<CategoryMatch> = categories
            .iter()
            .map(|category| {
                let mut seen = HashSet::new();
                let vocabulary: Vec<&String> = category
                    .keywords
                    .iter()
                    .filter(|kw| !kw.trim().is_empty() && seen.insert(kw.trim().to_lowercase()))
                    .collect();
                let matched = vocabulary
                    .iter()
                    .filter(|kw| self.contains(kw))
                    .map(|kw| kw.trim().to_string())
                    .collect();
                CategoryMatch {
                    category: category.name.clone(),
                    matched,
                    vocabulary: vocabulary.len(),
                }
            })
            .collect();

        let industry = best_category(&categories).map(|c| c.category.clone());
        KeywordMatchResult {
            categories,
            industry,
        }
    }
}

/// Highest match count wins; ties go to the first declared category.
fn best_category(categories: &[CategoryMatch]) -> Option<&CategoryMatch> {
    let mut best: Option<&CategoryMatch> = None;
    for candidate in categories {
        if candidate.matched.is_empty() {
            continue;
        }
        if best.map_or(true, |b| candidate.matched.len() > b.matched.len()) {
            best = Some(candidate);
        }
    }
    best
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn tokenize(text_lower: &str) -> Vec<String> {
    text_lower
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '/')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_keywords(
        text: &str,
        categories: &[KeywordCategory],
        fuzzy_threshold: Option<f64>,
    ) -> KeywordMatchResult {
        KeywordMatcher::new(text, fuzzy_threshold).match_categories(categories)
    }

    fn categories() -> Vec<KeywordCategory> {
        vec![
            KeywordCategory {
                name: "languages".to_string(),
                keywords: vec![
                    "python".to_string(),
                    "sql".to_string(),
                    "c++".to_string(),
                    "go".to_string(),
                ],
            },
            KeywordCategory {
                name: "bi".to_string(),
                keywords: vec!["power bi".to_string(), "tableau".to_string()],
            },
        ]
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let result = match_keywords("Expert in PYTHON and Sql", &categories(), None);
        assert_eq!(result.categories[0].matched, vec!["python", "sql"]);
        assert_eq!(result.industry.as_deref(), Some("languages"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        let result = match_keywords("Worked at Google on a sqlite mysql port", &categories(), None);
        assert!(result.categories[0].matched.is_empty());
        assert_eq!(result.industry, None);
    }

    #[test]
    fn test_symbols_and_phrases() {
        let result = match_keywords("C++, Go; Power BI dashboards", &categories(), None);
        assert_eq!(result.categories[0].matched, vec!["c++", "go"]);
        assert_eq!(result.categories[1].matched, vec!["power bi"]);
    }

    #[test]
    fn test_repeats_count_once() {
        let result = match_keywords("python python python", &categories(), None);
        assert_eq!(result.categories[0].matched, vec!["python"]);
    }

    #[test]
    fn test_duplicate_vocabulary_entries_collapsed() {
        let cats = vec![KeywordCategory {
            name: "x".to_string(),
            keywords: vec!["Rust".to_string(), "rust".to_string(), " ".to_string()],
        }];
        let result = match_keywords("rust", &cats, None);
        assert_eq!(result.categories[0].vocabulary, 1);
        assert_eq!(result.categories[0].matched, vec!["Rust"]);
    }

    #[test]
    fn test_industry_tie_goes_to_first_category() {
        let result = match_keywords("python tableau", &categories(), None);
        assert_eq!(result.categories[0].matched.len(), 1);
        assert_eq!(result.categories[1].matched.len(), 1);
        assert_eq!(result.industry.as_deref(), Some("languages"));
    }

    #[test]
    fn test_industry_highest_count_wins() {
        let result = match_keywords("python, power bi, tableau", &categories(), None);
        assert_eq!(result.industry.as_deref(), Some("bi"));
    }

    #[test]
    fn test_fuzzy_tolerates_typos() {
        let text = "Skilled in pyhton and tablaeu";
        let exact = match_keywords(text, &categories(), None);
        assert!(exact.categories.iter().all(|c| c.matched.is_empty()));

        let fuzzy = match_keywords(text, &categories(), Some(0.6));
        assert_eq!(fuzzy.categories[0].matched, vec!["python"]);
        assert_eq!(fuzzy.categories[1].matched, vec!["tableau"]);
    }

    #[test]
    fn test_fuzzy_multi_word_keyword() {
        let result = match_keywords("built powr bi reports", &categories(), Some(0.8));
        assert_eq!(result.categories[1].matched, vec!["power bi"]);
    }

    #[test]
    fn test_fuzzy_skips_short_keywords() {
        let result = match_keywords("sal and ga", &categories(), Some(0.5));
        assert!(result.categories[0].matched.is_empty());
    }

    #[test]
    fn test_fuzzy_threshold_rejects_distant_words() {
        let result = match_keywords("painting", &categories(), Some(0.8));
        assert!(result.categories.iter().all(|c| c.matched.is_empty()));
    }

    #[test]
    fn test_adding_keyword_never_reduces_matches() {
        let base = "python developer";
        let before = match_keywords(base, &categories(), None).unique_matches().len();
        let after = match_keywords(&format!("{base} sql"), &categories(), None)
            .unique_matches()
            .len();
        assert!(after >= before + 1);
    }
}

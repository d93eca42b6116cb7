use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of resume sections the detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Summary,
    Objective,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Summary => "summary",
            SectionLabel::Objective => "objective",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Skills => "skills",
            SectionLabel::Projects => "projects",
            SectionLabel::Certifications => "certifications",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section label → body text. A label appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: BTreeMap<SectionLabel, String>,
}

impl SectionMap {
    /// Records a section body. A repeated label appends to the existing body.
    pub fn append(&mut self, label: SectionLabel, body: &str) {
        let entry = self.sections.entry(label).or_default();
        if body.is_empty() {
            return;
        }
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(body);
    }

    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        self.sections.get(&label).map(String::as_str)
    }

    pub fn contains(&self, label: SectionLabel) -> bool {
        self.sections.contains_key(&label)
    }

    pub fn labels(&self) -> Vec<SectionLabel> {
        self.sections.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Formatting and content counts derived from the raw text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    pub bullet_points: u32,
    pub numeric_mentions: u32,
    pub action_verbs: u32,
    pub word_count: u32,
    pub paragraphs: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEstimate {
    pub total_years: u32,
    pub positions: u32,
}

/// Matched keywords for one vocabulary category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub category: String,
    pub matched: Vec<String>,
    /// Number of distinct keywords in the category vocabulary.
    pub vocabulary: usize,
}

impl CategoryMatch {
    /// Fraction of the category vocabulary found in the text, 0.0 – 1.0.
    pub fn coverage(&self) -> f64 {
        if self.vocabulary == 0 {
            return 0.0;
        }
        self.matched.len() as f64 / self.vocabulary as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatchResult {
    pub categories: Vec<CategoryMatch>,
    /// Category with the most matches; `None` when nothing matched.
    pub industry: Option<String>,
}

impl KeywordMatchResult {
    /// Distinct matched keywords across all categories, in first-seen order.
    pub fn unique_matches(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.matched.iter())
            .filter(|kw| seen.insert(kw.to_lowercase()))
            .cloned()
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryMatch> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// Sub-scores, each bounded by its profile ceiling, plus the final composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub section: f64,
    pub keyword: f64,
    pub experience: f64,
    pub education: f64,
    pub formatting: f64,
    pub composite: u32,
}

/// Response value of a single scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32, // 0 – 100
    pub job_profile: String,
    pub industry: Option<String>,
    pub score_breakdown: ScoreBreakdown,
    pub sections_found: Vec<SectionLabel>,
    pub missing_sections: Vec<SectionLabel>,
    pub matched_keywords: Vec<String>,
    pub keyword_matches: Vec<CategoryMatch>,
    pub experience_years: u32,
    pub positions: u32,
    pub structure: StructuralMetrics,
    pub suggestions: Vec<String>,
}

//! Resume scoring — turns plain resume text into a bounded ATS score plus feedback.
//!
//! Pipeline: sections → (structure, experience, keywords, degree) → composer → feedback.
//! Every stage is pure; the only external input is the injected `YearClock`.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>` so handlers never depend on the
//! concrete heuristic implementation.

pub mod composer;
pub mod education;
pub mod experience;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod sections;
pub mod structure;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::profiles::{JobProfile, ProfileRegistry};
use crate::scoring::composer::{compose, Normalization, ScoreBounds, ScoreInputs};
use crate::scoring::experience::{YearClock, DEFAULT_EXPERIENCE_CAP};
use crate::scoring::keywords::KeywordMatcher;
use crate::scoring::models::{AnalysisResult, SectionLabel};

/// Profile name that asks the scorer to pick the best-matching profile.
pub const AUTO_PROFILE: &str = "auto";
pub const DEFAULT_KEYWORD_SAMPLE: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Resume text is empty")]
    EmptyInput,
}

/// Deployment-level scoring policy. Per-role numbers live in `JobProfile`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOptions {
    pub normalization: Normalization,
    pub bounds: ScoreBounds,
    /// `Some(threshold)` enables fuzzy keyword matching.
    pub fuzzy_threshold: Option<f64>,
    pub experience_cap: u32,
    /// Maximum number of entries in `AnalysisResult::matched_keywords`.
    pub keyword_sample: usize,
    pub clock: YearClock,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            normalization: Normalization::default(),
            bounds: ScoreBounds::default(),
            fuzzy_threshold: None,
            experience_cap: DEFAULT_EXPERIENCE_CAP,
            keyword_sample: DEFAULT_KEYWORD_SAMPLE,
            clock: YearClock::default(),
        }
    }
}

/// The scorer trait. Implement this to swap scoring backends without touching
/// handlers.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, text: &str, profile_name: Option<&str>) -> Result<AnalysisResult, ScoreError>;

    /// Backend label, reported by `/health`.
    fn backend(&self) -> &'static str;
}

/// Keyword/section/formatting heuristic scorer over a static profile registry.
pub struct HeuristicScorer {
    profiles: Arc<ProfileRegistry>,
    options: ScoringOptions,
}

impl HeuristicScorer {
    pub fn new(profiles: Arc<ProfileRegistry>, options: ScoringOptions) -> Self {
        Self { profiles, options }
    }

    /// Profile whose vocabulary matches the most distinct keywords; ties go to
    /// registry order.
    fn infer_profile(&self, matcher: &KeywordMatcher) -> &JobProfile {
        let mut best = self.profiles.default_profile();
        let mut best_count = 0;
        for profile in self.profiles.iter() {
            let count = matcher
                .match_categories(&profile.keyword_categories)
                .unique_matches()
                .len();
            if count > best_count {
                best = profile;
                best_count = count;
            }
        }
        best
    }
}

impl ResumeScorer for HeuristicScorer {
    fn score(&self, text: &str, profile_name: Option<&str>) -> Result<AnalysisResult, ScoreError> {
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let matcher = KeywordMatcher::new(text, self.options.fuzzy_threshold);

        let profile = match profile_name {
            Some(name) if name.trim().eq_ignore_ascii_case(AUTO_PROFILE) => {
                let inferred = self.infer_profile(&matcher);
                debug!(profile = %inferred.name, "Inferred job profile");
                inferred
            }
            _ => {
                let selection = self.profiles.resolve(profile_name);
                if !selection.recognized {
                    warn!(
                        requested = profile_name.unwrap_or_default(),
                        fallback = %selection.profile.name,
                        "Unrecognized job profile, using default"
                    );
                }
                selection.profile
            }
        };

        let result = analyze_with(text, &matcher, profile, &self.options);
        info!(
            profile = %result.job_profile,
            score = result.score,
            sections = result.sections_found.len(),
            keywords = result.matched_keywords.len(),
            "Scored resume"
        );
        Ok(result)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

fn analyze_with(
    text: &str,
    matcher: &KeywordMatcher,
    profile: &JobProfile,
    options: &ScoringOptions,
) -> AnalysisResult {
    let sections = sections::detect_sections(text);
    if sections.is_empty() {
        debug!("No section headings recognized");
    } else {
        debug!(found = sections.len(), "Detected sections");
    }

    let metrics = structure::analyze_structure(text);

    let experience_text = sections
        .get(SectionLabel::Experience)
        .filter(|body| !body.trim().is_empty())
        .unwrap_or(text);
    let experience = experience::extract_experience(
        experience_text,
        options.clock.current_year(),
        options.experience_cap,
    );
    debug!(
        years = experience.total_years,
        positions = experience.positions,
        "Estimated experience"
    );

    let keywords = matcher.match_categories(&profile.keyword_categories);

    let education_text = sections
        .get(SectionLabel::Education)
        .filter(|body| !body.trim().is_empty())
        .unwrap_or(text);
    let degree = education::highest_degree(education_text);

    let breakdown = compose(
        &ScoreInputs {
            sections: &sections,
            metrics: &metrics,
            experience: &experience,
            keywords: &keywords,
            degree,
        },
        profile,
        options.normalization,
        options.bounds,
    );

    let suggestions =
        feedback::generate_feedback(profile, &sections, &keywords, &experience, &metrics);

    let matched_keywords = keywords
        .unique_matches()
        .into_iter()
        .take(options.keyword_sample)
        .collect();

    AnalysisResult {
        score: breakdown.composite,
        job_profile: profile.name.clone(),
        industry: keywords.industry.clone(),
        score_breakdown: breakdown,
        sections_found: sections.labels(),
        missing_sections: feedback::missing_sections(profile, &sections),
        matched_keywords,
        keyword_matches: keywords.categories,
        experience_years: experience.total_years,
        positions: experience.positions,
        structure: metrics,
        suggestions,
    }
}

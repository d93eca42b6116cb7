//! Score composition — turns detector signals into bounded sub-scores and a composite.
//!
//! Algorithm:
//! 1. section    = present_required / required × ceiling (full ceiling if none required)
//! 2. keyword    = min(unique_matches × points_per_keyword, ceiling)
//! 3. experience = min(total_years × points_per_year, ceiling)
//! 4. education  = ceiling × (0.4 if an education section exists + 0.6 × degree weight)
//! 5. formatting = ceiling × Σ bonus shares for bullets, numbers, verbs, length
//! 6. raw        = Σ multiplier × sub / Σ multiplier × ceiling × 100
//! 7. composite  = bounds.clamp(round(normalize(raw)))

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::profiles::JobProfile;
use crate::scoring::education::DegreeLevel;
use crate::scoring::models::{
    ExperienceEstimate, KeywordMatchResult, ScoreBreakdown, SectionLabel, SectionMap,
    StructuralMetrics,
};

const EDUCATION_SECTION_SHARE: f64 = 0.4;
const EDUCATION_DEGREE_SHARE: f64 = 0.6;

const BULLET_BONUS: (u32, f64) = (3, 0.3);
const NUMERIC_BONUS: (u32, f64) = (2, 0.3);
const ACTION_VERB_BONUS: (u32, f64) = (3, 0.2);
const LENGTH_BONUS_SHARE: f64 = 0.2;
const IDEAL_WORD_RANGE: std::ops::RangeInclusive<u32> = 200..=1000;

const SIGMOID_CENTER: f64 = 45.0;
const SIGMOID_STEEPNESS: f64 = 0.06;

/// How the raw 0–100 composite is reshaped before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Identity; the bound policy does the clamping.
    #[default]
    Clamp,
    /// Logistic squash that keeps typical resumes away from either extreme.
    Sigmoid,
}

impl Normalization {
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            Normalization::Clamp => raw,
            Normalization::Sigmoid => {
                100.0 / (1.0 + (-SIGMOID_STEEPNESS * (raw - SIGMOID_CENTER)).exp())
            }
        }
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(Normalization::Clamp),
            "sigmoid" => Ok(Normalization::Sigmoid),
            other => Err(format!("unknown normalization '{other}' (expected clamp|sigmoid)")),
        }
    }
}

/// Final score range. One policy per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBounds {
    /// [0, 100]
    #[default]
    Full,
    /// [40, 95]
    Band,
}

impl ScoreBounds {
    pub fn range(&self) -> (u32, u32) {
        match self {
            ScoreBounds::Full => (0, 100),
            ScoreBounds::Band => (40, 95),
        }
    }

    pub fn clamp(&self, value: f64) -> u32 {
        let (floor, ceiling) = self.range();
        if !value.is_finite() {
            return floor;
        }
        (value.round().max(0.0) as u32).clamp(floor, ceiling)
    }
}

impl FromStr for ScoreBounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(ScoreBounds::Full),
            "band" => Ok(ScoreBounds::Band),
            other => Err(format!("unknown score bounds '{other}' (expected full|band)")),
        }
    }
}

/// Everything the composer reads, gathered from the detector stages.
pub struct ScoreInputs<'a> {
    pub sections: &'a SectionMap,
    pub metrics: &'a StructuralMetrics,
    pub experience: &'a ExperienceEstimate,
    pub keywords: &'a KeywordMatchResult,
    pub degree: Option<DegreeLevel>,
}

pub fn compose(
    inputs: &ScoreInputs<'_>,
    profile: &JobProfile,
    normalization: Normalization,
    bounds: ScoreBounds,
) -> ScoreBreakdown {
    let weights = &profile.weights;
    let ceilings = &weights.ceilings;

    let section = section_score(inputs.sections, &profile.required_sections, ceilings.section);
    let keyword = (inputs.keywords.unique_matches().len() as f64 * weights.points_per_keyword)
        .min(ceilings.keyword);
    let experience = (inputs.experience.total_years as f64 * weights.points_per_year)
        .min(ceilings.experience);
    let education = education_score(inputs.sections, inputs.degree, ceilings.education);
    let formatting = formatting_score(inputs.metrics, ceilings.formatting);

    let multipliers = weights.multipliers.values();
    let subs = [section, keyword, experience, education, formatting];
    let achieved: f64 = subs.iter().zip(multipliers).map(|(s, m)| s * m).sum();
    let possible: f64 = ceilings
        .values()
        .iter()
        .zip(multipliers)
        .map(|(c, m)| c * m)
        .sum();

    let raw = if possible > 0.0 {
        (achieved / possible * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    ScoreBreakdown {
        section: round1(section),
        keyword: round1(keyword),
        experience: round1(experience),
        education: round1(education),
        formatting: round1(formatting),
        composite: bounds.clamp(normalization.apply(raw)),
    }
}

fn section_score(sections: &SectionMap, required: &[SectionLabel], ceiling: f64) -> f64 {
    if required.is_empty() {
        return ceiling;
    }
    let present = required.iter().filter(|l| sections.contains(**l)).count();
    present as f64 / required.len() as f64 * ceiling
}

fn education_score(sections: &SectionMap, degree: Option<DegreeLevel>, ceiling: f64) -> f64 {
    let mut share = 0.0;
    if sections.contains(SectionLabel::Education) {
        share += EDUCATION_SECTION_SHARE;
    }
    if let Some(level) = degree {
        share += EDUCATION_DEGREE_SHARE * level.weight();
    }
    (share * ceiling).min(ceiling)
}

fn formatting_score(metrics: &StructuralMetrics, ceiling: f64) -> f64 {
    let mut share = 0.0;
    if metrics.bullet_points >= BULLET_BONUS.0 {
        share += BULLET_BONUS.1;
    }
    if metrics.numeric_mentions >= NUMERIC_BONUS.0 {
        share += NUMERIC_BONUS.1;
    }
    if metrics.action_verbs >= ACTION_VERB_BONUS.0 {
        share += ACTION_VERB_BONUS.1;
    }
    if IDEAL_WORD_RANGE.contains(&metrics.word_count) {
        share += LENGTH_BONUS_SHARE;
    }
    (share * ceiling).min(ceiling)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{ComponentWeights, KeywordCategory, ScoreWeights};
    use crate::scoring::models::CategoryMatch;

    fn profile(required: Vec<SectionLabel>) -> JobProfile {
        JobProfile {
            name: "test".to_string(),
            description: String::new(),
            required_sections: required,
            keyword_categories: vec![KeywordCategory {
                name: "core".to_string(),
                keywords: vec![],
            }],
            weights: ScoreWeights::default(),
        }
    }

    fn keywords(matched: &[&str]) -> KeywordMatchResult {
        KeywordMatchResult {
            categories: vec![CategoryMatch {
                category: "core".to_string(),
                matched: matched.iter().map(|s| s.to_string()).collect(),
                vocabulary: 20,
            }],
            industry: None,
        }
    }

    fn sections(labels: &[SectionLabel]) -> SectionMap {
        let mut map = SectionMap::default();
        for label in labels {
            map.append(*label, "body");
        }
        map
    }

    fn compose_with(
        sections: &SectionMap,
        metrics: StructuralMetrics,
        years: u32,
        kw: &KeywordMatchResult,
        degree: Option<DegreeLevel>,
        profile: &JobProfile,
    ) -> ScoreBreakdown {
        let experience = ExperienceEstimate {
            total_years: years,
            positions: 1,
        };
        let inputs = ScoreInputs {
            sections,
            metrics: &metrics,
            experience: &experience,
            keywords: kw,
            degree,
        };
        compose(&inputs, profile, Normalization::Clamp, ScoreBounds::Full)
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let p = profile(vec![SectionLabel::Experience]);
        let b = compose_with(
            &SectionMap::default(),
            StructuralMetrics::default(),
            0,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.composite, 0);
        assert_eq!(b.section, 0.0);
    }

    #[test]
    fn test_full_signals_score_100() {
        let p = profile(vec![SectionLabel::Experience, SectionLabel::Education]);
        let metrics = StructuralMetrics {
            bullet_points: 10,
            numeric_mentions: 10,
            action_verbs: 10,
            word_count: 500,
            paragraphs: 5,
        };
        let many: Vec<String> = (0..20).map(|i| format!("kw{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let b = compose_with(
            &sections(&[SectionLabel::Experience, SectionLabel::Education]),
            metrics,
            25,
            &keywords(&many),
            Some(DegreeLevel::Doctorate),
            &p,
        );
        assert_eq!(b.section, 25.0);
        assert_eq!(b.keyword, 35.0);
        assert_eq!(b.experience, 20.0);
        assert_eq!(b.education, 10.0);
        assert_eq!(b.formatting, 10.0);
        assert_eq!(b.composite, 100);
    }

    #[test]
    fn test_section_score_is_proportional() {
        let p = profile(vec![
            SectionLabel::Experience,
            SectionLabel::Education,
            SectionLabel::Skills,
            SectionLabel::Projects,
        ]);
        let b = compose_with(
            &sections(&[SectionLabel::Experience, SectionLabel::Skills]),
            StructuralMetrics::default(),
            0,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.section, 12.5);
    }

    #[test]
    fn test_no_required_sections_gives_full_credit() {
        let p = profile(vec![]);
        let b = compose_with(
            &SectionMap::default(),
            StructuralMetrics::default(),
            0,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.section, 25.0);
    }

    #[test]
    fn test_keyword_score_monotone_and_capped() {
        let p = profile(vec![]);
        let mut last = -1.0;
        let names: Vec<String> = (0..15).map(|i| format!("kw{i}")).collect();
        for n in 0..names.len() {
            let matched: Vec<&str> = names[..n].iter().map(String::as_str).collect();
            let b = compose_with(
                &SectionMap::default(),
                StructuralMetrics::default(),
                0,
                &keywords(&matched),
                None,
                &p,
            );
            assert!(b.keyword >= last);
            assert!(b.keyword <= 35.0);
            last = b.keyword;
        }
        assert_eq!(last, 35.0);
    }

    #[test]
    fn test_experience_capped_at_ceiling() {
        let p = profile(vec![]);
        let b = compose_with(
            &SectionMap::default(),
            StructuralMetrics::default(),
            3,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.experience, 12.0);
        let b = compose_with(
            &SectionMap::default(),
            StructuralMetrics::default(),
            30,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.experience, 20.0);
    }

    #[test]
    fn test_education_section_and_degree() {
        let p = profile(vec![]);
        let b = compose_with(
            &sections(&[SectionLabel::Education]),
            StructuralMetrics::default(),
            0,
            &keywords(&[]),
            Some(DegreeLevel::Bachelor),
            &p,
        );
        // 10 × (0.4 + 0.6 × 0.7)
        assert_eq!(b.education, 8.2);
    }

    #[test]
    fn test_multipliers_reweight_composite() {
        let mut p = profile(vec![SectionLabel::Experience]);
        p.weights.multipliers = ComponentWeights {
            section: 1.0,
            keyword: 0.0,
            experience: 0.0,
            education: 0.0,
            formatting: 0.0,
        };
        let b = compose_with(
            &sections(&[SectionLabel::Experience]),
            StructuralMetrics::default(),
            0,
            &keywords(&[]),
            None,
            &p,
        );
        assert_eq!(b.composite, 100);
    }

    #[test]
    fn test_sigmoid_keeps_mid_range_near_middle() {
        let mid = Normalization::Sigmoid.apply(50.0);
        assert!((50.0..=70.0).contains(&mid), "got {mid}");
        assert!(Normalization::Sigmoid.apply(0.0) < 10.0);
        assert!(Normalization::Sigmoid.apply(100.0) > 90.0);
        assert!(Normalization::Sigmoid.apply(100.0) <= 100.0);
    }

    #[test]
    fn test_bounds_policies() {
        assert_eq!(ScoreBounds::Full.clamp(-3.0), 0);
        assert_eq!(ScoreBounds::Full.clamp(100.4), 100);
        assert_eq!(ScoreBounds::Full.clamp(64.5), 65);
        assert_eq!(ScoreBounds::Band.clamp(12.0), 40);
        assert_eq!(ScoreBounds::Band.clamp(99.0), 95);
        assert_eq!(ScoreBounds::Band.clamp(f64::NAN), 40);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Sigmoid".parse::<Normalization>(), Ok(Normalization::Sigmoid));
        assert_eq!("band".parse::<ScoreBounds>(), Ok(ScoreBounds::Band));
        assert!("wide".parse::<ScoreBounds>().is_err());
    }
}

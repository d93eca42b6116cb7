//! Job profiles — read-only scoring configuration loaded once at startup.
//!
//! A profile names the sections a resume is expected to have, the keyword
//! vocabularies it is matched against, and the weights the composer uses.
//! Builtin profiles live in `builtin`; a JSON file can add profiles or
//! replace builtins by name.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scoring::models::SectionLabel;

pub mod builtin;

/// Profile used when a request names no profile or an unknown one.
pub const DEFAULT_PROFILE: &str = "generic";
/// Alias that always selects `DEFAULT_PROFILE`.
pub const DEFAULT_ALIAS: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// One number per score component. Used both for ceilings and multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub section: f64,
    pub keyword: f64,
    pub experience: f64,
    pub education: f64,
    pub formatting: f64,
}

impl ComponentWeights {
    pub fn uniform() -> Self {
        Self {
            section: 1.0,
            keyword: 1.0,
            experience: 1.0,
            education: 1.0,
            formatting: 1.0,
        }
    }

    pub fn values(&self) -> [f64; 5] {
        [
            self.section,
            self.keyword,
            self.experience,
            self.education,
            self.formatting,
        ]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

/// Score weights for a profile. Builtin ceilings sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub ceilings: ComponentWeights,
    /// Relative contribution of each component to the composite.
    #[serde(default = "ComponentWeights::uniform")]
    pub multipliers: ComponentWeights,
    pub points_per_keyword: f64,
    pub points_per_year: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ceilings: ComponentWeights {
                section: 25.0,
                keyword: 35.0,
                experience: 20.0,
                education: 10.0,
                formatting: 10.0,
            },
            multipliers: ComponentWeights::uniform(),
            points_per_keyword: 3.5,
            points_per_year: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_sections: Vec<SectionLabel>,
    pub keyword_categories: Vec<KeywordCategory>,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl JobProfile {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("profile name cannot be empty");
        }
        let weights = &self.weights;
        let all = weights
            .ceilings
            .values()
            .into_iter()
            .chain(weights.multipliers.values())
            .chain([weights.points_per_keyword, weights.points_per_year]);
        for value in all {
            if !value.is_finite() || value < 0.0 {
                bail!(
                    "profile '{}' has a negative or non-finite weight ({value})",
                    self.name
                );
            }
        }
        if weights.ceilings.total() <= 0.0 {
            bail!("profile '{}' has no positive score ceiling", self.name);
        }
        let weighted_total: f64 = weights
            .ceilings
            .values()
            .iter()
            .zip(weights.multipliers.values())
            .map(|(c, m)| c * m)
            .sum();
        if weighted_total <= 0.0 {
            bail!("profile '{}' weights every component at zero", self.name);
        }
        for category in &self.keyword_categories {
            if category.name.trim().is_empty() {
                bail!("profile '{}' has an unnamed keyword category", self.name);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    profiles: Vec<JobProfile>,
}

/// Outcome of looking a profile up by name.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSelection<'a> {
    pub profile: &'a JobProfile,
    /// False when the requested name was absent or unknown and the default was used.
    pub recognized: bool,
}

/// The set of configured profiles. Always contains `DEFAULT_PROFILE`.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<JobProfile>,
    default_index: usize,
}

impl ProfileRegistry {
    pub fn builtin() -> Self {
        Self::from_profiles(builtin::builtin_profiles()).expect("builtin profiles are valid")
    }

    pub fn from_profiles(profiles: Vec<JobProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            profile.validate()?;
            if !seen.insert(profile.name.to_lowercase()) {
                bail!("duplicate profile '{}'", profile.name);
            }
        }
        let default_index = profiles
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(DEFAULT_PROFILE))
            .with_context(|| format!("default profile '{DEFAULT_PROFILE}' is not configured"))?;
        Ok(Self {
            profiles,
            default_index,
        })
    }

    /// Builtin profiles, overlaid with the profiles in `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let registry = Self::builtin();
        let Some(path) = path else {
            return Ok(registry);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profiles file '{}'", path.display()))?;
        let file: ProfileFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid profiles file '{}'", path.display()))?;
        let count = file.profiles.len();
        let registry = registry.merge(file.profiles)?;
        info!("Loaded {count} profile(s) from {}", path.display());
        Ok(registry)
    }

    /// Adds `overrides`, replacing existing profiles that share a name.
    pub fn merge(self, overrides: Vec<JobProfile>) -> Result<Self> {
        let mut profiles = self.profiles;
        for profile in overrides {
            match profiles
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(&profile.name))
            {
                Some(existing) => *existing = profile,
                None => profiles.push(profile),
            }
        }
        Self::from_profiles(profiles)
    }

    pub fn get(&self, name: &str) -> Option<&JobProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn default_profile(&self) -> &JobProfile {
        &self.profiles[self.default_index]
    }

    /// Looks up `name`, falling back to the default profile.
    pub fn resolve(&self, name: Option<&str>) -> ProfileSelection<'_> {
        if name.is_some_and(|n| n.trim().eq_ignore_ascii_case(DEFAULT_ALIAS)) {
            return ProfileSelection {
                profile: self.default_profile(),
                recognized: true,
            };
        }
        match name.and_then(|n| self.get(n)) {
            Some(profile) => ProfileSelection {
                profile,
                recognized: true,
            },
            None => ProfileSelection {
                profile: self.default_profile(),
                recognized: name.map_or(true, |n| n.trim().is_empty()),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

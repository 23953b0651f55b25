//! Resolves the free text left in a chunk to a roster entity.

use serde::{Deserialize, Serialize};

use super::fuzzy::FuzzyMatcher;
use crate::roster::Roster;

/// Acceptance rules for fuzzy identity matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Residuals with at most this many characters use `short_threshold`
    pub short_max_len: usize,
    /// Minimum confidence for short residuals
    pub short_threshold: f64,
    /// Minimum confidence for longer residuals
    pub long_threshold: f64,
    /// When set, the partial ratio between residual and candidate must exceed this too
    pub partial_overlap_min: Option<f64>,
    /// Accept a residual that is character-identical to a roster entry
    pub exact_fallback: bool,
}

/// Named presets selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyPreset {
    /// Flat threshold of 50, no overlap check
    Baseline,
    /// 70/75 split at 8 characters plus a partial overlap above 65
    Strict,
}

impl MatchPolicy {
    pub fn baseline() -> Self {
        Self {
            short_max_len: 8,
            short_threshold: 50.0,
            long_threshold: 50.0,
            partial_overlap_min: None,
            exact_fallback: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            short_max_len: 8,
            short_threshold: 70.0,
            long_threshold: 75.0,
            partial_overlap_min: Some(65.0),
            exact_fallback: true,
        }
    }

    pub fn from_preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::Baseline => Self::baseline(),
            PolicyPreset::Strict => Self::strict(),
        }
    }

    /// Confidence threshold for a residual of `len` characters.
    pub fn threshold_for(&self, len: usize) -> f64 {
        if len <= self.short_max_len {
            self.short_threshold
        } else {
            self.long_threshold
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// Drops every character that is not a letter, digit or space, then trims.
pub fn clean_residual(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Matches residual chunk text against the roster.
pub struct IdentityResolver<'a> {
    roster: &'a Roster,
    matcher: &'a dyn FuzzyMatcher,
    policy: &'a MatchPolicy,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(roster: &'a Roster, matcher: &'a dyn FuzzyMatcher, policy: &'a MatchPolicy) -> Self {
        Self {
            roster,
            matcher,
            policy,
        }
    }

    /// Returns the entity name for `residual`, or `None` if nothing is accepted.
    ///
    /// The residual is cleaned first. The fuzzy candidate is accepted when its
    /// confidence reaches the length-dependent threshold (and, if configured,
    /// the partial overlap clears its minimum). Otherwise an exact roster hit
    /// on the cleaned text is accepted when the fallback is enabled.
    pub fn resolve(&self, residual: &str) -> Option<String> {
        let cleaned = clean_residual(residual);
        if cleaned.is_empty() {
            return None;
        }

        if let Some(found) = self.matcher.best_match(&cleaned, self.roster.names()) {
            let threshold = self.policy.threshold_for(cleaned.chars().count());
            let overlap_ok = match self.policy.partial_overlap_min {
                Some(min) => self.matcher.partial_ratio(&cleaned, &found.candidate) > min,
                None => true,
            };
            if found.confidence >= threshold && overlap_ok {
                return Some(found.candidate);
            }
        }

        if self.policy.exact_fallback && self.roster.contains(&cleaned) {
            return Some(cleaned);
        }

        None
    }
}

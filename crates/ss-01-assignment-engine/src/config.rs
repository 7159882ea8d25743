//! Configuration for the Assignment Engine

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Compatibility heuristic selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringStrategy {
    /// Every pair gets the base score
    #[default]
    Baseline,
    /// Base score plus bonuses for shared category and hobby tags
    PreferenceOverlap,
}

impl FromStr for ScoringStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(ScoringStrategy::Baseline),
            "preference-overlap" => Ok(ScoringStrategy::PreferenceOverlap),
            other => Err(ConfigError::InvalidValue {
                key: "SS_SCORING",
                value: other.to_string(),
            }),
        }
    }
}

/// Which history constrains a reshuffle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReshufflePolicy {
    /// The discarded round counts as history; no pair is repeated
    #[default]
    AvoidPrevious,
    /// The new round is drawn with no history
    Unconstrained,
}

impl FromStr for ReshufflePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avoid-previous" => Ok(ReshufflePolicy::AvoidPrevious),
            "unconstrained" => Ok(ReshufflePolicy::Unconstrained),
            other => Err(ConfigError::InvalidValue {
                key: "SS_RESHUFFLE_POLICY",
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("{key} must be within [0, 1], got {value}")]
    BonusOutOfRange { key: &'static str, value: f64 },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Engine configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Upper bound on random resampling before declaring failure
    pub max_attempts: usize,
    /// Seed for the engine's random source. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    /// Compatibility heuristic
    pub scoring: ScoringStrategy,
    /// Added when giver and receiver share a gift category (overlap scoring)
    pub category_bonus: f64,
    /// Added per shared hobby tag (overlap scoring)
    pub shared_tag_bonus: f64,
    /// History used when an admin reshuffles
    pub reshuffle_policy: ReshufflePolicy,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            rng_seed: None,
            scoring: ScoringStrategy::Baseline,
            category_bonus: 0.25,
            shared_tag_bonus: 0.05,
            reshuffle_policy: ReshufflePolicy::AvoidPrevious,
        }
    }
}

impl AssignmentConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SS_MAX_ATTEMPTS`: retry budget (default: 100)
    /// - `SS_RNG_SEED`: fixed seed (default: entropy)
    /// - `SS_SCORING`: `baseline` | `preference-overlap` (default: baseline)
    /// - `SS_CATEGORY_BONUS`: default 0.25
    /// - `SS_SHARED_TAG_BONUS`: default 0.05
    /// - `SS_RESHUFFLE_POLICY`: `avoid-previous` | `unconstrained`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("SS_MAX_ATTEMPTS") {
            config.max_attempts = parse_value("SS_MAX_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("SS_RNG_SEED") {
            config.rng_seed = Some(parse_value("SS_RNG_SEED", &v)?);
        }
        if let Some(v) = lookup("SS_SCORING") {
            config.scoring = v.parse()?;
        }
        if let Some(v) = lookup("SS_CATEGORY_BONUS") {
            config.category_bonus = parse_value("SS_CATEGORY_BONUS", &v)?;
        }
        if let Some(v) = lookup("SS_SHARED_TAG_BONUS") {
            config.shared_tag_bonus = parse_value("SS_SHARED_TAG_BONUS", &v)?;
        }
        if let Some(v) = lookup("SS_RESHUFFLE_POLICY") {
            config.reshuffle_policy = v.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        for (key, value) in [
            ("category_bonus", self.category_bonus),
            ("shared_tag_bonus", self.shared_tag_bonus),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BonusOutOfRange { key, value });
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

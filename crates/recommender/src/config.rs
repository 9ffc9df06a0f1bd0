use crate::{
    policy::{PassPolicy, PassRule, RetakePolicy},
    ranker::{BlockedPolicy, RankingPolicy, ScoringWeights},
};
use log::debug;
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;

/// Maximum recommendations per request
pub const LIMIT_VAR: &str = "RECOMMENDER_LIMIT";
/// `weighted` or `simple`
pub const SCORING_VAR: &str = "RECOMMENDER_SCORING";
/// `exclude` or `flag`
pub const BLOCKED_VAR: &str = "RECOMMENDER_BLOCKED";
/// `flag` or a minimum grade letter
pub const PASS_RULE_VAR: &str = "RECOMMENDER_PASS_RULE";
/// `any`, `recent` or `best`
pub const RETAKES_VAR: &str = "RECOMMENDER_RETAKES";

/// Default number of recommendations
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Named scoring formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScoringPreset {
    #[default]
    Weighted,
    Simple,
}

impl ScoringPreset {
    pub fn weights(&self) -> ScoringWeights {
        match self {
            Self::Weighted => ScoringWeights::weighted(),
            Self::Simple => ScoringWeights::simple(),
        }
    }
}

/// Engine settings read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub limit: usize,
    pub scoring: ScoringPreset,
    pub blocked: BlockedPolicy,
    pub pass_rule: PassRule,
    pub retakes: RetakePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            scoring: ScoringPreset::default(),
            blocked: BlockedPolicy::default(),
            pass_rule: PassRule::default(),
            retakes: RetakePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Loads `.env` if present, then reads the `RECOMMENDER_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, unset keys keep their defaults
    ///
    /// # Arguments
    /// * `lookup` - Returns the raw value for a variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let limit = match lookup(LIMIT_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(invalid(LIMIT_VAR, value, "positive integer")),
            },
            None => defaults.limit,
        };

        let config = Self {
            limit,
            scoring: parse_var(&lookup, SCORING_VAR, "scoring preset")?
                .unwrap_or(defaults.scoring),
            blocked: parse_var(&lookup, BLOCKED_VAR, "blocked policy")?
                .unwrap_or(defaults.blocked),
            pass_rule: parse_var(&lookup, PASS_RULE_VAR, "pass rule")?
                .unwrap_or(defaults.pass_rule),
            retakes: parse_var(&lookup, RETAKES_VAR, "retake policy")?
                .unwrap_or(defaults.retakes),
        };
        debug!("Engine configuration: {config:?}");

        Ok(config)
    }

    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            weights: self.scoring.weights(),
            blocked: self.blocked,
        }
    }

    pub fn pass_policy(&self) -> PassPolicy {
        PassPolicy::new(self.pass_rule, self.retakes)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(key, value, expected)),
        None => Ok(None),
    }
}

fn invalid(key: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value,
        expected,
    }
}

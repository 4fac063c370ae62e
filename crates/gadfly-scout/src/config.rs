//! Configuration for the red-team scout
//!
//! Defines the cycle cadence, watchlist rules and audit thresholds.

use crate::ScoutError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scout and its background worker
///
/// # Examples
///
/// ```
/// use gadfly_scout::ScoutConfig;
///
/// // Default configuration (hourly cycles, 20% rotation)
/// let config = ScoutConfig::default();
/// assert_eq!(config.rotation_rate, 0.2);
///
/// // Aggressive monitoring
/// let config = ScoutConfig::aggressive();
/// assert_eq!(config.stale_days, 14);
///
/// // Lenient monitoring
/// let config = ScoutConfig::lenient();
/// assert_eq!(config.max_goals, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// How often the worker runs a cycle (in minutes)
    /// Default: 60
    pub cycle_interval_minutes: u64,

    /// Goals pursued per cycle
    /// Default: 3
    pub max_goals: usize,

    /// A goal search must return more than this many sources to notify
    /// Default: 3
    pub goal_min_results: usize,

    /// Entries not updated for longer than this are always watched
    /// Default: 30 days
    pub stale_days: u64,

    /// Probability that any other entry is watched this cycle
    /// Default: 0.2
    pub rotation_rate: f64,

    /// Entries above this confidence with thin evidence are always watched
    /// Default: 0.8
    pub high_confidence_threshold: f64,

    /// Evidence count below which a confident entry counts as thin
    /// Default: 3
    pub min_sources: usize,

    /// Confidence assumed by the watchlist for entries that carry none
    /// Default: 0.5
    pub watch_default_confidence: f64,

    /// Confidence assumed by the audit for entries that carry none
    /// Default: 0.8
    pub audit_default_confidence: f64,

    /// A finding opens a research thread when the adjusted confidence drops below this
    /// Default: 0.6
    pub thread_confidence_threshold: f64,

    /// Hypotheses requested per audited entry
    /// Default: 3
    pub max_hypotheses: usize,

    /// Sampling temperature for hypothesis generation
    /// Default: 0.15
    pub hypothesis_temperature: f32,

    /// Output cap for hypothesis generation
    /// Default: 150
    pub hypothesis_max_tokens: u32,

    /// Sampling temperature for grounded searches
    /// Default: 0.2
    pub search_temperature: f32,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            cycle_interval_minutes: 60,
            max_goals: 3,
            goal_min_results: 3,
            stale_days: 30,
            rotation_rate: 0.2,
            high_confidence_threshold: 0.8,
            min_sources: 3,
            watch_default_confidence: 0.5,
            audit_default_confidence: 0.8,
            thread_confidence_threshold: 0.6,
            max_hypotheses: 3,
            hypothesis_temperature: 0.15,
            hypothesis_max_tokens: 150,
            search_temperature: 0.2,
        }
    }
}

impl ScoutConfig {
    /// Frequent cycles, wide rotation, short staleness window
    pub fn aggressive() -> Self {
        Self {
            cycle_interval_minutes: 30,
            max_goals: 5,
            stale_days: 14,
            rotation_rate: 0.4,
            ..Self::default()
        }
    }

    /// Rare cycles, narrow rotation, long staleness window
    pub fn lenient() -> Self {
        Self {
            cycle_interval_minutes: 240,
            max_goals: 1,
            stale_days: 60,
            rotation_rate: 0.1,
            ..Self::default()
        }
    }

    /// Get cycle interval as Duration
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_minutes * 60)
    }

    /// Get staleness threshold as Duration
    pub fn stale_threshold(&self) -> Duration {
        Duration::from_secs(self.stale_days * 86400)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.cycle_interval_minutes == 0 {
            return Err(ScoutError::Config(
                "cycle_interval_minutes must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("rotation_rate", self.rotation_rate),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("watch_default_confidence", self.watch_default_confidence),
            ("audit_default_confidence", self.audit_default_confidence),
            ("thread_confidence_threshold", self.thread_confidence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoutError::Config(format!("{} must be within [0, 1]", name)));
            }
        }
        for (name, t) in [
            ("hypothesis_temperature", self.hypothesis_temperature),
            ("search_temperature", self.search_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(ScoutError::Config(format!("{} must be within [0, 2]", name)));
            }
        }
        if self.hypothesis_max_tokens == 0 {
            return Err(ScoutError::Config(
                "hypothesis_max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScoutError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ScoutError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ScoutError> {
        toml::to_string_pretty(self)
            .map_err(|e| ScoutError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

//! Configuration for the watchdog and the annotation manager

use crate::WatchdogError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for background disagreement and conversation replies
///
/// # Examples
///
/// ```
/// use gadfly_watchdog::WatchdogConfig;
///
/// let config = WatchdogConfig::default();
/// assert_eq!(config.confidence_spike_threshold, 0.88);
/// assert_eq!(config.critique_delay().as_secs(), 2);
/// assert_eq!(config.counter_search_delay().as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchdogConfig {
    /// Confidence above which a synthesis is challenged
    /// Default: 0.88
    pub confidence_spike_threshold: f64,

    /// Delay before the red-team critique (in milliseconds)
    /// Default: 2000
    pub critique_delay_ms: u64,

    /// Delay before the adversarial counter-search (in milliseconds)
    /// Default: 5000
    pub counter_search_delay_ms: u64,

    /// Delay before an agent answers a user reply (in milliseconds)
    /// Default: 1000
    pub reply_delay_ms: u64,

    /// Entries not updated for longer than this get a staleness warning
    /// Default: 14 days
    pub staleness_days: u64,

    /// Severity of staleness warnings
    /// Default: 0.3
    pub staleness_severity: f64,

    /// Sampling temperature for the red-team critique
    /// Default: 0.1
    pub red_team_temperature: f32,

    /// Output cap for the red-team critique
    /// Default: 300
    pub red_team_max_tokens: u32,

    /// Characters of synthesis quoted to the red team
    /// Default: 2000
    pub synthesis_excerpt_chars: usize,

    /// Vault entries sampled into the red-team prompt
    /// Default: 10
    pub vault_sample_count: usize,

    /// Characters of each sampled entry's content
    /// Default: 150
    pub vault_sample_chars: usize,

    /// Critiques must exceed this severity to be attached
    /// Default: 0.5
    pub critique_annotation_threshold: f64,

    /// Characters of synthesis used as the counter-search claim
    /// Default: 200
    pub claim_excerpt_chars: usize,

    /// Sampling temperature for counter-searches
    /// Default: 0.2
    pub search_temperature: f32,

    /// Severity of counter-search findings
    /// Default: 0.85
    pub counter_finding_severity: f64,

    /// Sampling temperature for agent replies
    /// Default: 0.2
    pub reply_temperature: f32,

    /// Word limit stated in the reply prompt
    /// Default: 120
    pub reply_word_limit: usize,

    /// Output cap for agent replies
    /// Default: 240
    pub reply_max_tokens: u32,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            confidence_spike_threshold: 0.88,
            critique_delay_ms: 2000,
            counter_search_delay_ms: 5000,
            reply_delay_ms: 1000,
            staleness_days: 14,
            staleness_severity: 0.3,
            red_team_temperature: 0.1,
            red_team_max_tokens: 300,
            synthesis_excerpt_chars: 2000,
            vault_sample_count: 10,
            vault_sample_chars: 150,
            critique_annotation_threshold: 0.5,
            claim_excerpt_chars: 200,
            search_temperature: 0.2,
            counter_finding_severity: 0.85,
            reply_temperature: 0.2,
            reply_word_limit: 120,
            reply_max_tokens: 240,
        }
    }
}

impl WatchdogConfig {
    /// Challenge more syntheses and flag staleness sooner
    pub fn aggressive() -> Self {
        Self {
            confidence_spike_threshold: 0.75,
            staleness_days: 7,
            critique_annotation_threshold: 0.3,
            ..Self::default()
        }
    }

    /// Only challenge near-certain syntheses
    pub fn lenient() -> Self {
        Self {
            confidence_spike_threshold: 0.95,
            staleness_days: 30,
            critique_annotation_threshold: 0.8,
            ..Self::default()
        }
    }

    /// Get critique delay as Duration
    pub fn critique_delay(&self) -> Duration {
        Duration::from_millis(self.critique_delay_ms)
    }

    /// Get counter-search delay as Duration
    pub fn counter_search_delay(&self) -> Duration {
        Duration::from_millis(self.counter_search_delay_ms)
    }

    /// Get reply delay as Duration
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), WatchdogError> {
        for (name, value) in [
            ("confidence_spike_threshold", self.confidence_spike_threshold),
            ("staleness_severity", self.staleness_severity),
            ("critique_annotation_threshold", self.critique_annotation_threshold),
            ("counter_finding_severity", self.counter_finding_severity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WatchdogError::Config(format!("{} must be within [0, 1]", name)));
            }
        }
        for (name, t) in [
            ("red_team_temperature", self.red_team_temperature),
            ("search_temperature", self.search_temperature),
            ("reply_temperature", self.reply_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(WatchdogError::Config(format!("{} must be within [0, 2]", name)));
            }
        }
        if self.synthesis_excerpt_chars == 0 || self.claim_excerpt_chars == 0 {
            return Err(WatchdogError::Config(
                "excerpt lengths must be greater than 0".to_string(),
            ));
        }
        if self.reply_word_limit == 0 || self.reply_max_tokens == 0 || self.red_team_max_tokens == 0
        {
            return Err(WatchdogError::Config(
                "output limits must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, WatchdogError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| WatchdogError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, WatchdogError> {
        toml::to_string_pretty(self)
            .map_err(|e| WatchdogError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

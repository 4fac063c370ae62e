//! Configuration for adversarial review

use crate::AdvocateError;
use serde::{Deserialize, Serialize};

/// Most contradictions a report may carry
pub const MAX_KEY_CONTRADICTIONS: usize = 5;

/// Most counterfactuals a report may carry
pub const MAX_COUNTERFACTUALS: usize = 3;

/// What the auto-trigger decision does to an explicitly requested review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Always review; record whether the trigger fired
    #[default]
    Advisory,
    /// Skip standard-mode reviews the trigger does not demand
    Gate,
}

/// Configuration for the Devil's Advocate and the skeptic reviewer
///
/// # Examples
///
/// ```
/// use gadfly_advocate::{AdvocateConfig, TriggerPolicy};
///
/// let config = AdvocateConfig::default();
/// assert_eq!(config.trigger_policy, TriggerPolicy::Advisory);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvocateConfig {
    /// Whether the trigger gates standard reviews
    #[serde(default)]
    pub trigger_policy: TriggerPolicy,

    /// Sampling temperature for the steel-man request
    /// Default: 0.15
    pub steelman_temperature: f32,

    /// Sampling temperature for the debate request
    /// Default: 0.2
    pub debate_temperature: f32,

    /// Characters of synthesis quoted in the steel-man prompt
    pub steelman_excerpt_chars: usize,

    /// Characters of synthesis quoted in the debate prompt
    pub debate_excerpt_chars: usize,

    /// Contradictions kept in a report, at most [`MAX_KEY_CONTRADICTIONS`]
    pub max_key_contradictions: usize,

    /// Counterfactuals kept in a report, at most [`MAX_COUNTERFACTUALS`]
    pub max_counterfactuals: usize,

    /// Confidence assumed for entries that carry none
    pub default_entry_confidence: f64,

    /// Attach the rendered report to the reviewed entry as an objection
    #[serde(default = "default_attach_annotation")]
    pub attach_annotation: bool,
}

fn default_attach_annotation() -> bool {
    true
}

impl Default for AdvocateConfig {
    fn default() -> Self {
        Self {
            trigger_policy: TriggerPolicy::Advisory,
            steelman_temperature: 0.15,
            debate_temperature: 0.2,
            steelman_excerpt_chars: 1500,
            debate_excerpt_chars: 1000,
            max_key_contradictions: MAX_KEY_CONTRADICTIONS,
            max_counterfactuals: MAX_COUNTERFACTUALS,
            default_entry_confidence: 0.7,
            attach_annotation: true,
        }
    }
}

impl AdvocateConfig {
    /// Review everything and sample the opposition more freely
    pub fn aggressive() -> Self {
        Self {
            trigger_policy: TriggerPolicy::Advisory,
            steelman_temperature: 0.35,
            debate_temperature: 0.5,
            ..Self::default()
        }
    }

    /// Only review what the trigger demands
    pub fn lenient() -> Self {
        Self {
            trigger_policy: TriggerPolicy::Gate,
            attach_annotation: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AdvocateError> {
        for (name, t) in [
            ("steelman_temperature", self.steelman_temperature),
            ("debate_temperature", self.debate_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(AdvocateError::Config(format!("{} must be within [0, 2]", name)));
            }
        }
        if self.steelman_excerpt_chars == 0 || self.debate_excerpt_chars == 0 {
            return Err(AdvocateError::Config(
                "excerpt lengths must be greater than 0".to_string(),
            ));
        }
        if !(1..=MAX_KEY_CONTRADICTIONS).contains(&self.max_key_contradictions) {
            return Err(AdvocateError::Config(format!(
                "max_key_contradictions must be within [1, {}]",
                MAX_KEY_CONTRADICTIONS
            )));
        }
        if !(1..=MAX_COUNTERFACTUALS).contains(&self.max_counterfactuals) {
            return Err(AdvocateError::Config(format!(
                "max_counterfactuals must be within [1, {}]",
                MAX_COUNTERFACTUALS
            )));
        }
        if !(0.0..=1.0).contains(&self.default_entry_confidence) {
            return Err(AdvocateError::Config(
                "default_entry_confidence must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, AdvocateError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| AdvocateError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, AdvocateError> {
        toml::to_string_pretty(self)
            .map_err(|e| AdvocateError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(AdvocateConfig::default().validate().is_ok());
        assert!(AdvocateConfig::aggressive().validate().is_ok());
        assert!(AdvocateConfig::lenient().validate().is_ok());
        assert_eq!(AdvocateConfig::lenient().trigger_policy, TriggerPolicy::Gate);
    }

    #[test]
    fn test_aggressive_keeps_report_limits() {
        let aggressive = AdvocateConfig::aggressive();
        assert_eq!(aggressive.max_key_contradictions, MAX_KEY_CONTRADICTIONS);
        assert_eq!(aggressive.max_counterfactuals, MAX_COUNTERFACTUALS);
        assert!(aggressive.debate_temperature > AdvocateConfig::default().debate_temperature);
    }

    #[test]
    fn test_report_limits_are_capped() {
        let contradictions = AdvocateConfig {
            max_key_contradictions: MAX_KEY_CONTRADICTIONS + 1,
            ..AdvocateConfig::default()
        };
        assert!(matches!(contradictions.validate(), Err(AdvocateError::Config(_))));

        let counterfactuals = AdvocateConfig {
            max_counterfactuals: MAX_COUNTERFACTUALS + 1,
            ..AdvocateConfig::default()
        };
        assert!(matches!(counterfactuals.validate(), Err(AdvocateError::Config(_))));

        let text = AdvocateConfig::default()
            .to_toml()
            .unwrap()
            .replace("max_key_contradictions = 5", "max_key_contradictions = 10");
        assert!(AdvocateConfig::from_toml(&text).is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let config = AdvocateConfig {
            debate_temperature: 3.0,
            ..AdvocateConfig::default()
        };
        assert!(matches!(config.validate(), Err(AdvocateError::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AdvocateConfig::lenient();
        let text = config.to_toml().unwrap();
        assert!(text.contains("trigger_policy = \"gate\""));
        assert_eq!(AdvocateConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_defaults_optional_fields() {
        let text = r#"
            steelman_temperature = 0.15
            debate_temperature = 0.2
            steelman_excerpt_chars = 1500
            debate_excerpt_chars = 1000
            max_key_contradictions = 5
            max_counterfactuals = 3
            default_entry_confidence = 0.7
        "#;
        let config = AdvocateConfig::from_toml(text).unwrap();
        assert_eq!(config.trigger_policy, TriggerPolicy::Advisory);
        assert!(config.attach_annotation);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let mut text = AdvocateConfig::default().to_toml().unwrap();
        text = text.replace("max_counterfactuals = 3", "max_counterfactuals = 0");
        assert!(AdvocateConfig::from_toml(&text).is_err());
    }
}

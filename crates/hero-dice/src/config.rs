//! House-rule configuration for the roll engine.

use serde::Deserialize;

use crate::error::{RollError, RollResult};

/// Tunable constants for a [`HeroRoller`](crate::HeroRoller).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RollerConfig {
    /// Face every whole die shows under standard effect.
    pub standard_effect_die: u32,
    /// Raw face every half die shows under standard effect.
    pub standard_effect_half_die: u32,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            standard_effect_die: 3,
            standard_effect_half_die: 1,
        }
    }
}

impl RollerConfig {
    /// Set the standard-effect face for whole dice (clamped to 1-6).
    pub fn with_standard_effect_die(mut self, face: u32) -> Self {
        self.standard_effect_die = face.clamp(1, 6);
        self
    }

    /// Set the standard-effect face for half dice (clamped to 1-6).
    pub fn with_standard_effect_half_die(mut self, face: u32) -> Self {
        self.standard_effect_half_die = face.clamp(1, 6);
        self
    }

    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> RollResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RollError::Config(e.to_string()))?;
        let (die, half_die) = (config.standard_effect_die, config.standard_effect_half_die);
        Ok(config
            .with_standard_effect_die(die)
            .with_standard_effect_half_die(half_die))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = RollerConfig::default();
        assert_eq!(cfg.standard_effect_die, 3);
        assert_eq!(cfg.standard_effect_half_die, 1);
    }

    #[test]
    fn builder_methods_clamp() {
        let cfg = RollerConfig::default()
            .with_standard_effect_die(9)
            .with_standard_effect_half_die(0);
        assert_eq!(cfg.standard_effect_die, 6);
        assert_eq!(cfg.standard_effect_half_die, 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RollerConfig::from_json_str(r#"{ "standard_effect_die": 4 }"#).unwrap();
        assert_eq!(cfg.standard_effect_die, 4);
        assert_eq!(cfg.standard_effect_half_die, 1);
    }

    #[test]
    fn json_values_are_clamped() {
        let cfg = RollerConfig::from_json_str(r#"{ "standard_effect_half_die": 12 }"#).unwrap();
        assert_eq!(cfg.standard_effect_half_die, 6);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = RollerConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, RollError::Config(_)));
    }
}

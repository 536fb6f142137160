//! Serializable AGC configuration.
//!
//! [`AgcConfig`] captures everything a caller sets on an [`Agc`] before
//! streaming starts. Missing fields take their documented defaults, so a
//! partial document such as `{"strategy": "exp", "bandwidth": 0.01}` is valid.

use serde::{Deserialize, Serialize};

use crate::dsp::agc::Agc;
use crate::dsp::limiter::{DEFAULT_GAIN_MAX, DEFAULT_GAIN_MIN};
use crate::dsp::strategy::GainStrategy;
use crate::error::Result;

/// AGC configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgcConfig {
    /// Gain update law (default: logarithmic)
    pub strategy: GainStrategy,
    /// Target output energy, > 0 (default: 1.0)
    pub target: f64,
    /// Initial gain, > 0 (default: 1.0)
    pub gain: f64,
    /// Minimum gain (default: 1e-6)
    pub gain_min: f64,
    /// Maximum gain (default: 1e6)
    pub gain_max: f64,
    /// Loop bandwidth-time product in [0, 1] (default: 0.0)
    pub bandwidth: f64,
}

impl Default for AgcConfig {
    fn default() -> Self {
        Self {
            strategy: GainStrategy::default(),
            target: 1.0,
            gain: 1.0,
            gain_min: DEFAULT_GAIN_MIN,
            gain_max: DEFAULT_GAIN_MAX,
            bandwidth: 0.0,
        }
    }
}

impl AgcConfig {
    /// Check every field against the constraints the AGC setters enforce.
    pub fn validate(&self) -> Result<()> {
        Agc::<f64>::from_config(self).map(|_| ())
    }

    /// Build an AGC at the requested precision.
    pub fn build<T: crate::dsp::Sample>(&self) -> Result<Agc<T>> {
        Agc::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AgcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_matches_new() {
        let agc = AgcConfig::default().build::<f64>().unwrap();
        assert_eq!(agc, Agc::<f64>::new());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let cases = [
            AgcConfig {
                target: 0.0,
                ..Default::default()
            },
            AgcConfig {
                gain_min: 5.0,
                gain_max: 1.0,
                ..Default::default()
            },
            AgcConfig {
                bandwidth: 1.5,
                ..Default::default()
            },
            AgcConfig {
                gain: -1.0,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidArgument(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_partial_json() {
        let config: AgcConfig =
            serde_json::from_str(r#"{"strategy": "exp", "bandwidth": 0.01}"#).unwrap();
        assert_eq!(config.strategy, GainStrategy::Exponential);
        assert_eq!(config.bandwidth, 0.01);
        assert_eq!(config.target, 1.0);
        assert_eq!(config.gain_max, 1e6);
    }

    #[test]
    fn test_json_uses_lowercase_strategy_names() {
        let config = AgcConfig {
            strategy: GainStrategy::Default,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""strategy":"default""#), "{}", json);

        let back: AgcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_strategy_name_fails_to_parse() {
        let result = serde_json::from_str::<AgcConfig>(r#"{"strategy": "cubic"}"#);
        assert!(result.is_err());
    }
}

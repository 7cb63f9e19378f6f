//! Engine configuration (resource limits and numeric tolerance).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Environment variable overriding [`EngineConfig::max_outcomes`].
pub const ENV_MAX_OUTCOMES: &str = "DICEPOOL_MAX_OUTCOMES";
/// Environment variable overriding [`EngineConfig::parallel_threshold`].
pub const ENV_PARALLEL_THRESHOLD: &str = "DICEPOOL_PARALLEL_THRESHOLD";
/// Environment variable overriding [`EngineConfig::tolerance`].
pub const ENV_TOLERANCE: &str = "DICEPOOL_TOLERANCE";

/// Settings that bound the checked pool and reroll variants.
///
/// The plain operations (`pool`, `reroll`, ...) never consult a config; only
/// `try_pool`, `par_pool` and `reroll_checked` do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum distinct outcomes the running pool distribution may hold.
    pub max_outcomes: usize,
    /// Minimum cross-product pairs in a pool step before it is split across threads.
    pub parallel_threshold: usize,
    /// Absolute tolerance used when checking that weights sum to 1.
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_outcomes: 1_000_000,
            parallel_threshold: 4_096,
            tolerance: 1e-9,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// Every checked operation calls this before doing any work.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` for a zero `max_outcomes` or a
    /// tolerance that is not finite and positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_outcomes == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "max_outcomes must be > 0".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ValidationError::InvalidConfig {
                reason: format!("tolerance must be finite and > 0, got {}", self.tolerance),
            });
        }
        Ok(())
    }

    /// Defaults overlaid with `DICEPOOL_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if a variable is set but does
    /// not parse, or if the resulting config fails [`EngineConfig::validate`].
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_OUTCOMES) {
            config.max_outcomes = parse_var(ENV_MAX_OUTCOMES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            config.parallel_threshold = parse_var(ENV_PARALLEL_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TOLERANCE) {
            config.tolerance = parse_var(ENV_TOLERANCE, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<V: std::str::FromStr>(key: &str, raw: &str) -> Result<V, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidConfig {
            reason: format!("{key}={raw:?} is not a valid value"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn config_rejects_bad_limits() {
        let mut c = EngineConfig::default();
        c.max_outcomes = 0;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.tolerance = 0.0;
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.tolerance = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn config_from_lookup_overrides_defaults() {
        let config = EngineConfig::from_lookup(|key| match key {
            ENV_MAX_OUTCOMES => Some("500".to_string()),
            ENV_TOLERANCE => Some(" 1e-6 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.max_outcomes, 500);
        assert_eq!(config.parallel_threshold, EngineConfig::default().parallel_threshold);
        assert!((config.tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn config_from_lookup_rejects_garbage() {
        let err = EngineConfig::from_lookup(|key| {
            (key == ENV_PARALLEL_THRESHOLD).then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(format!("{err}").contains(ENV_PARALLEL_THRESHOLD));
    }

    #[test]
    fn config_deserializes_partial_json() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_outcomes": 64}"#).unwrap();
        assert_eq!(config.max_outcomes, 64);
        assert!((config.tolerance - 1e-9).abs() < f64::EPSILON);
    }
}

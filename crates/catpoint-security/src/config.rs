//! # Security Service Configuration
//!
//! Loaded from YAML. Every field has a default, so an empty document is a
//! valid config.
//!
//! ```yaml
//! confidence_threshold: 65.0
//! ```

use std::path::Path;

use catpoint_image::DEFAULT_CONFIDENCE_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for [`SecurityService`](crate::SecurityService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// Minimum classifier confidence, in percent, to count a cat sighting.
    pub confidence_threshold: f32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl SecurityConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.confidence_threshold;
        if !t.is_finite() || !(0.0..=100.0).contains(&t) {
            return Err(ConfigError::InvalidThreshold(t));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_threshold() {
        assert_eq!(SecurityConfig::default().confidence_threshold, 50.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            SecurityConfig::from_yaml_str("").unwrap(),
            SecurityConfig::default()
        );
    }

    #[test]
    fn test_parse_threshold() {
        let config = SecurityConfig::from_yaml_str("confidence_threshold: 72.5").unwrap();
        assert_eq!(config.confidence_threshold, 72.5);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let err = SecurityConfig::from_yaml_str("confidence_threshold: 101").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(t) if t == 101.0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SecurityConfig::from_yaml_str("threshold: 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "confidence_threshold: 30").unwrap();
        let config = SecurityConfig::load(file.path()).unwrap();
        assert_eq!(config.confidence_threshold, 30.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SecurityConfig::load(Path::new("/nonexistent/catpoint.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

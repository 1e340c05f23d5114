//! Normalizer thresholds, loadable from YAML.
//!
//! ```yaml
//! max-sections: 12
//! density-slack: 10
//! min-unique-chords: 25
//! ```
//!
//! Missing keys fall back to the defaults above.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Heuristic limits used to reject fragmented or hallucinated charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NormalizerConfig {
    /// More sections than this is treated as fragmented output
    pub max_sections: usize,
    /// Unique chords allowed above ceil(measures / 2)
    pub density_slack: usize,
    /// Unique chord count must also exceed this before density rejects
    pub min_unique_chords: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_sections: 12,
            density_slack: 10,
            min_unique_chords: 25,
        }
    }
}

impl NormalizerConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ChartError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Largest unique chord count accepted for `measures` measures
    pub fn density_limit(&self, measures: usize) -> usize {
        measures.div_ceil(2) + self.density_slack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.max_sections, 12);
        assert_eq!(config.density_limit(30), 25);
        assert_eq!(config.density_limit(31), 26);
        assert_eq!(config.density_limit(0), 10);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = NormalizerConfig::from_yaml("max-sections: 20\n").unwrap();
        assert_eq!(config.max_sections, 20);
        assert_eq!(config.density_slack, 10);
        assert_eq!(config.min_unique_chords, 25);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            NormalizerConfig::from_yaml("max-sections: lots"),
            Err(ChartError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            NormalizerConfig::load("/nonexistent/normalizer.yaml"),
            Err(ChartError::Io { .. })
        ));
    }
}

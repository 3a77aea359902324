//! Analysis configuration.
//!
//! All thresholds the engine uses are explicit values here rather than
//! constants buried in the analyzer, so tests and callers can substitute
//! alternates without touching shared state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Observation;

/// Errors from loading configuration files.
///
/// The engine itself never raises; this enum only covers the TOML
/// loading boundary.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown metric '{0}' referenced by configuration")]
    UnknownMetric(String),
}

/// Thresholds for one significance tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThreshold {
    /// Minimum absolute percent difference
    pub min_percent: f64,
    /// Minimum combined sample count across both groups
    pub min_samples: usize,
}

/// Constants of the confidence blend.
///
/// `confidence = samples / samples_divisor * samples_weight
///             + |pct| / percent_divisor * percent_weight`, capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceBlend {
    pub samples_divisor: f64,
    pub samples_weight: f64,
    pub percent_divisor: f64,
    pub percent_weight: f64,
}

impl Default for ConfidenceBlend {
    fn default() -> Self {
        Self {
            samples_divisor: 30.0,
            samples_weight: 50.0,
            percent_divisor: 20.0,
            percent_weight: 50.0,
        }
    }
}

/// Tunable parameters of the correlation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rolling window of most recent observed days to analyze
    pub window_days: usize,

    /// Fewer distinct observed days than this yields no results at all
    pub min_history_days: usize,

    /// Both the with- and without-group need at least this many days
    pub min_group_size: usize,

    /// Absolute percent differences below this are forced neutral
    pub neutral_band_pct: f64,

    /// High-significance tier gate
    pub high: TierThreshold,

    /// Medium-significance tier gate
    pub medium: TierThreshold,

    /// Low-significance tier gate; pairs below this are dropped
    pub low: TierThreshold,

    /// How sample size and effect magnitude blend into the 0-100
    /// confidence score
    pub confidence: ConfidenceBlend,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_history_days: 7,
            min_group_size: 3,
            neutral_band_pct: 5.0,
            high: TierThreshold {
                min_percent: 15.0,
                min_samples: 14,
            },
            medium: TierThreshold {
                min_percent: 10.0,
                min_samples: 10,
            },
            low: TierThreshold {
                min_percent: 5.0,
                min_samples: 7,
            },
            confidence: ConfidenceBlend::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Keep only the most recent `window_days` distinct observed days.
///
/// Observations arrive ordered by date from the source; this tolerates
/// unordered input by sorting a copy. Pure function, input untouched.
#[must_use]
pub fn clip_to_window(observations: &[Observation], window_days: usize) -> Vec<Observation> {
    let mut sorted: Vec<Observation> = observations.to_vec();
    sorted.sort_by_key(|o| o.date);
    if sorted.len() > window_days {
        sorted.split_off(sorted.len() - window_days)
    } else {
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(d: u32) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(2025, 6, d).unwrap(), "test")
    }

    #[test]
    fn default_config_matches_documented_thresholds() {
        let config = AnalysisConfig::default();
        assert_eq!(config.window_days, 30);
        assert_eq!(config.min_history_days, 7);
        assert_eq!(config.min_group_size, 3);
        assert_eq!(config.neutral_band_pct, 5.0);
        assert_eq!(config.high.min_percent, 15.0);
        assert_eq!(config.high.min_samples, 14);
        assert_eq!(config.medium.min_percent, 10.0);
        assert_eq!(config.medium.min_samples, 10);
        assert_eq!(config.low.min_percent, 5.0);
        assert_eq!(config.low.min_samples, 7);
        assert_eq!(config.confidence.samples_divisor, 30.0);
        assert_eq!(config.confidence.samples_weight, 50.0);
        assert_eq!(config.confidence.percent_divisor, 20.0);
        assert_eq!(config.confidence.percent_weight, 50.0);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: AnalysisConfig = toml::from_str("window_days = 14").unwrap();
        assert_eq!(config.window_days, 14);
        assert_eq!(config.min_group_size, 3);
        assert_eq!(config.confidence, ConfidenceBlend::default());
    }

    #[test]
    fn confidence_blend_is_tunable_from_toml() {
        let config: AnalysisConfig =
            toml::from_str("[confidence]\nsamples_weight = 70.0\npercent_weight = 30.0").unwrap();
        assert_eq!(config.confidence.samples_weight, 70.0);
        assert_eq!(config.confidence.percent_weight, 30.0);
        assert_eq!(config.confidence.samples_divisor, 30.0);
        assert_eq!(config.confidence.percent_divisor, 20.0);
    }

    #[test]
    fn load_reads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulselab.toml");
        std::fs::write(&path, "min_history_days = 10\n").unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.min_history_days, 10);
        assert_eq!(config.window_days, 30);
    }

    #[test]
    fn load_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "window_days = \"thirty\"\n").unwrap();

        assert!(matches!(
            AnalysisConfig::load(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn clip_to_window_keeps_most_recent_days() {
        let observations: Vec<Observation> = (1..=10).map(obs).collect();
        let clipped = clip_to_window(&observations, 4);

        assert_eq!(clipped.len(), 4);
        assert_eq!(clipped[0].date, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
        assert_eq!(clipped[3].date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    }

    #[test]
    fn clip_to_window_tolerates_unordered_input() {
        let observations = vec![obs(9), obs(2), obs(5)];
        let clipped = clip_to_window(&observations, 2);

        assert_eq!(clipped[0].date, NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
        assert_eq!(clipped[1].date, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    }

    #[test]
    fn clip_to_window_returns_all_when_fewer_than_window() {
        let observations: Vec<Observation> = (1..=3).map(obs).collect();
        assert_eq!(clip_to_window(&observations, 30).len(), 3);
    }
}

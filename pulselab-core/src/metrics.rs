//! Metric definitions and the metric catalog.
//!
//! The catalog is static configuration supplied by the caller (or the
//! built-in defaults), never derived from observed data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Whether higher or lower values of a metric represent a better outcome.
///
/// Needed to infer a correlation's direction of effect: a decrease in a
/// lower-is-better metric (e.g., stress) is a positive outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger values are better (sleep score, HRV, recovery)
    HigherIsBetter,
    /// Smaller values are better (stress, resting heart rate)
    LowerIsBetter,
}

impl Polarity {
    /// Convert to configuration string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HigherIsBetter => "higher_is_better",
            Self::LowerIsBetter => "lower_is_better",
        }
    }

    /// Parse from configuration string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "higher_is_better" => Some(Self::HigherIsBetter),
            "lower_is_better" => Some(Self::LowerIsBetter),
            _ => None,
        }
    }
}

/// Definition of one biometric metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Canonical metric name as it appears in observations (e.g., "sleep_score")
    pub name: String,
    /// Human-readable label for insight text (e.g., "Sleep Score")
    pub display_label: String,
    /// Unit of measurement (e.g., "points", "ms", "bpm")
    pub unit: String,
    /// Which direction of change is an improvement
    pub polarity: Polarity,
}

/// Caller-supplied table of metric definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricCatalog {
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
}

impl MetricCatalog {
    /// Catalog covering the metrics common wearable platforms report.
    #[must_use]
    pub fn builtin() -> Self {
        let m = |name: &str, label: &str, unit: &str, polarity: Polarity| MetricDefinition {
            name: name.to_string(),
            display_label: label.to_string(),
            unit: unit.to_string(),
            polarity,
        };
        Self {
            metrics: vec![
                m("sleep_score", "Sleep Score", "points", Polarity::HigherIsBetter),
                m("recovery", "Recovery", "points", Polarity::HigherIsBetter),
                m("hrv", "Heart Rate Variability", "ms", Polarity::HigherIsBetter),
                m("stress", "Stress", "points", Polarity::LowerIsBetter),
                m(
                    "resting_heart_rate",
                    "Resting Heart Rate",
                    "bpm",
                    Polarity::LowerIsBetter,
                ),
            ],
        }
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Look up a metric definition by canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Display label for a metric, falling back to its canonical name.
    #[must_use]
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map_or(name, |m| m.display_label.as_str())
    }

    /// Polarity for a metric; unknown metrics default to higher-is-better.
    #[must_use]
    pub fn polarity(&self, name: &str) -> Polarity {
        self.get(name)
            .map_or(Polarity::HigherIsBetter, |m| m.polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_as_str_returns_correct_values() {
        assert_eq!(Polarity::HigherIsBetter.as_str(), "higher_is_better");
        assert_eq!(Polarity::LowerIsBetter.as_str(), "lower_is_better");
    }

    #[test]
    fn polarity_parse_returns_correct_variants() {
        assert_eq!(
            Polarity::parse("higher_is_better"),
            Some(Polarity::HigherIsBetter)
        );
        assert_eq!(
            Polarity::parse("lower_is_better"),
            Some(Polarity::LowerIsBetter)
        );
        assert_eq!(Polarity::parse("invalid"), None);
    }

    #[test]
    fn builtin_catalog_marks_stress_lower_is_better() {
        let catalog = MetricCatalog::builtin();
        assert_eq!(catalog.polarity("stress"), Polarity::LowerIsBetter);
        assert_eq!(catalog.polarity("sleep_score"), Polarity::HigherIsBetter);
    }

    #[test]
    fn label_falls_back_to_canonical_name_for_unknown_metric() {
        let catalog = MetricCatalog::builtin();
        assert_eq!(catalog.label("sleep_score"), "Sleep Score");
        assert_eq!(catalog.label("blood_glucose"), "blood_glucose");
    }

    #[test]
    fn unknown_metric_defaults_to_higher_is_better() {
        let catalog = MetricCatalog::builtin();
        assert_eq!(catalog.polarity("blood_glucose"), Polarity::HigherIsBetter);
    }

    #[test]
    fn catalog_deserializes_from_toml() {
        let toml = r#"
            [[metrics]]
            name = "glucose"
            display_label = "Blood Glucose"
            unit = "mg/dL"
            polarity = "lower_is_better"
        "#;
        let catalog: MetricCatalog = toml::from_str(toml).unwrap();
        assert_eq!(catalog.polarity("glucose"), Polarity::LowerIsBetter);
        assert_eq!(catalog.label("glucose"), "Blood Glucose");
    }
}

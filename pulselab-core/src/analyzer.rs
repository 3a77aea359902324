//! Correlation screening between daily interventions and biometric metrics.
//!
//! For every (intervention, metric) pair seen in the window, days are split
//! into with/without groups and the group means are compared. Pairs passing
//! the sample-size and effect-magnitude gates come out as ranked
//! [`CorrelationResult`]s. Descriptive screening only - no causal claims.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnalysisConfig, ConfidenceBlend};
use crate::metrics::{MetricCatalog, Polarity};
use crate::types::{InterventionLog, Observation, distinct_interventions, intervention_on};

/// Polarity-adjusted direction of a screened effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The intervention is associated with improvement
    Positive,
    /// The intervention is associated with decline
    Negative,
    /// Effect magnitude inside the neutral band
    Neutral,
}

impl Direction {
    /// Flip positive/negative; neutral stays neutral.
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// Discrete confidence classification gating which results surface.
///
/// Derived jointly from effect magnitude and sample size. `None`-tier
/// pairs are dropped before results leave the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    High,
    Medium,
    Low,
    None,
}

impl Significance {
    /// Rank for descending sort; higher tiers rank higher.
    #[must_use]
    fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::None => 0,
        }
    }

    /// Scoring weight for the effectiveness reduction.
    #[must_use]
    pub fn weight(self) -> f64 {
        f64::from(self.rank())
    }
}

/// Screened statistical comparison for one (intervention, metric) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Intervention identifier as logged by the caller
    pub intervention: String,
    /// Canonical metric name
    pub metric: String,
    /// Mean metric value on days the intervention was logged
    pub mean_with: f64,
    /// Mean metric value on days it was not
    pub mean_without: f64,
    /// Qualifying days in the with-group
    pub sample_size_with: usize,
    /// Qualifying days in the without-group
    pub sample_size_without: usize,
    /// Relative change of the with-mean against the without-mean, percent
    pub percent_difference: f64,
    /// Polarity-adjusted direction of the effect
    pub direction: Direction,
    /// Significance tier (never `None` in emitted results)
    pub significance: Significance,
    /// 0-100 ranking heuristic blending sample size and effect magnitude
    pub confidence: u8,
}

/// Screen every (intervention, metric) pair in the window.
///
/// Returns results sorted by significance descending, then confidence
/// descending, then (intervention, metric) ascending. Never errors;
/// insufficient data degrades to an empty or shorter list, and repeated
/// calls with identical inputs return identical, identically-ordered
/// output.
#[must_use]
pub fn analyze(
    observations: &[Observation],
    interventions: &InterventionLog,
    catalog: &MetricCatalog,
    config: &AnalysisConfig,
) -> Vec<CorrelationResult> {
    let observed_days: BTreeSet<NaiveDate> = observations.iter().map(|o| o.date).collect();
    if observed_days.len() < config.min_history_days {
        debug!(
            days = observed_days.len(),
            required = config.min_history_days,
            "insufficient history, skipping analysis"
        );
        return Vec::new();
    }

    let metric_names: BTreeSet<&str> = observations
        .iter()
        .flat_map(|o| o.metrics.keys())
        .map(String::as_str)
        .collect();

    let mut results = Vec::new();
    for intervention in &distinct_interventions(interventions) {
        for metric in &metric_names {
            if let Some(result) =
                screen_pair(observations, interventions, catalog, config, intervention, metric)
            {
                results.push(result);
            }
        }
    }

    results.sort_by(compare_results);
    debug!(results = results.len(), "correlation screen complete");
    results
}

/// Compare two days' groups for one pair; `None` when the pair fails a gate.
fn screen_pair(
    observations: &[Observation],
    interventions: &InterventionLog,
    catalog: &MetricCatalog,
    config: &AnalysisConfig,
    intervention: &str,
    metric: &str,
) -> Option<CorrelationResult> {
    let mut with_group = Vec::new();
    let mut without_group = Vec::new();

    // Days where the metric was not measured belong to neither group.
    for obs in observations {
        let Some(value) = obs.metric(metric) else {
            continue;
        };
        if intervention_on(interventions, obs.date, intervention) {
            with_group.push(value);
        } else {
            without_group.push(value);
        }
    }

    if with_group.len() < config.min_group_size || without_group.len() < config.min_group_size {
        return None;
    }

    let mean_with = mean(&with_group);
    let mean_without = mean(&without_group);
    let diff = mean_with - mean_without;

    // Zero baseline yields exactly 0%, never NaN/Inf. This suppresses the
    // signal rather than reporting an unbounded relative change.
    let percent_difference = if mean_without == 0.0 {
        debug!(intervention, metric, "zero baseline, suppressing pair");
        0.0
    } else {
        diff / mean_without * 100.0
    };

    let raw_direction = if diff > 0.0 {
        Direction::Positive
    } else if diff < 0.0 {
        Direction::Negative
    } else {
        Direction::Neutral
    };
    let mut direction = match catalog.polarity(metric) {
        Polarity::HigherIsBetter => raw_direction,
        Polarity::LowerIsBetter => raw_direction.inverted(),
    };
    if percent_difference.abs() < config.neutral_band_pct {
        direction = Direction::Neutral;
    }

    let total_samples = with_group.len() + without_group.len();
    let significance = tier(percent_difference.abs(), total_samples, config);
    if significance == Significance::None {
        return None;
    }

    let confidence = confidence(total_samples, percent_difference.abs(), &config.confidence);

    Some(CorrelationResult {
        intervention: intervention.to_string(),
        metric: metric.to_string(),
        mean_with,
        mean_without,
        sample_size_with: with_group.len(),
        sample_size_without: without_group.len(),
        percent_difference,
        direction,
        significance,
        confidence,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn tier(abs_pct: f64, total_samples: usize, config: &AnalysisConfig) -> Significance {
    if abs_pct >= config.high.min_percent && total_samples >= config.high.min_samples {
        Significance::High
    } else if abs_pct >= config.medium.min_percent && total_samples >= config.medium.min_samples {
        Significance::Medium
    } else if abs_pct >= config.low.min_percent && total_samples >= config.low.min_samples {
        Significance::Low
    } else {
        Significance::None
    }
}

/// Blend sample size and effect magnitude into a 0-100 ranking score.
fn confidence(total_samples: usize, abs_pct: f64, blend: &ConfidenceBlend) -> u8 {
    let raw = total_samples as f64 / blend.samples_divisor * blend.samples_weight
        + abs_pct / blend.percent_divisor * blend.percent_weight;
    raw.round().min(100.0) as u8
}

/// Significance desc, confidence desc, then pair key asc for stable ties.
fn compare_results(a: &CorrelationResult, b: &CorrelationResult) -> Ordering {
    b.significance
        .rank()
        .cmp(&a.significance.rank())
        .then(b.confidence.cmp(&a.confidence))
        .then_with(|| a.intervention.cmp(&b.intervention))
        .then_with(|| a.metric.cmp(&b.metric))
}

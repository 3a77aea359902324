//! Personal analytics engine for pulselab.
//!
//! Screens for statistical relationships between daily categorical
//! interventions (supplements, habits) and daily continuous biometric
//! observations (sleep, recovery, stress, HRV), then turns the screened
//! relationships into ranked insights and one aggregate efficacy score.
//!
//! # Architecture
//!
//! Data flows one way through three pure components:
//!
//! - [`analyze`] splits days into with/without groups per
//!   (intervention, metric) pair and screens the comparison
//! - [`generate`] converts the result set into ranked [`Insight`]s
//! - [`score`] reduces the result set to one [`EffectivenessScore`]
//!
//! Nothing is cached or mutated between invocations; every call is a
//! pure function of its inputs. The signals are descriptive and
//! sample-size-gated - this engine makes no causal claims.

mod analyzer;
mod config;
mod insights;
mod metrics;
mod registry;
mod score;
mod types;

// Analyzer types
pub use analyzer::{CorrelationResult, Direction, Significance, analyze};

// Configuration
pub use config::{AnalysisConfig, ConfidenceBlend, ConfigError, TierThreshold, clip_to_window};

// Insight types
pub use insights::{Insight, InsightKind, generate};

// Metric catalog
pub use metrics::{MetricCatalog, MetricDefinition, Polarity};

// Known-effect registry
pub use registry::{EffectRegistry, KnownEffect};

// Scoring
pub use score::{EffectivenessScore, Grade, score};

// Input types
pub use types::{InterventionLog, Observation, distinct_interventions, intervention_on};

use serde::{Deserialize, Serialize};

/// The three derived artifacts of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub correlations: Vec<CorrelationResult>,
    pub insights: Vec<Insight>,
    pub effectiveness: EffectivenessScore,
}

/// Run the full pipeline: clip to the rolling window, screen
/// correlations, then derive insights and the effectiveness score.
#[must_use]
pub fn run_analysis(
    observations: &[Observation],
    interventions: &InterventionLog,
    catalog: &MetricCatalog,
    registry: &EffectRegistry,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let window = clip_to_window(observations, config.window_days);
    let correlations = analyze(&window, interventions, catalog, config);
    let insights = generate(&correlations, registry, catalog);
    let effectiveness = score(&correlations);
    AnalysisReport {
        correlations,
        insights,
        effectiveness,
    }
}

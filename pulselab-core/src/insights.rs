//! Insight generation from screened correlation results.
//!
//! Turns the analyzer's ranked result list into a short list of
//! actionable statements: capped positives first, then one warning per
//! negative result, then trial suggestions drawn from the known-effect
//! registry. The concatenation order is the final order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{CorrelationResult, Direction};
use crate::metrics::MetricCatalog;
use crate::registry::EffectRegistry;

/// Maximum number of positive insights surfaced per invocation.
const MAX_POSITIVE_INSIGHTS: usize = 3;

/// Classification of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// An intervention is working
    Positive,
    /// An intervention is associated with decline
    Warning,
    /// A known intervention worth trialing
    Suggestion,
}

/// One actionable statement derived from the correlation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,

    /// Intervention this insight refers to, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention: Option<String>,

    /// Metric this insight refers to, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

/// Generate insights from an analyzer result list.
///
/// `results` must already be in analyzer order; positives are taken from
/// the front of the list so the highest-ranked effects surface first.
#[must_use]
pub fn generate(
    results: &[CorrelationResult],
    registry: &EffectRegistry,
    catalog: &MetricCatalog,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    for result in results
        .iter()
        .filter(|r| r.direction == Direction::Positive)
        .take(MAX_POSITIVE_INSIGHTS)
    {
        let label = catalog.label(&result.metric);
        insights.push(Insight {
            kind: InsightKind::Positive,
            title: format!("{} is improving your {}", result.intervention, label),
            description: format!(
                "On days with {}, your {} differed by {:.1}% ({:.1} vs {:.1} across {} days).",
                result.intervention,
                label,
                result.percent_difference.abs(),
                result.mean_with,
                result.mean_without,
                result.sample_size_with + result.sample_size_without,
            ),
            intervention: Some(result.intervention.clone()),
            metric: Some(result.metric.clone()),
        });
    }

    for result in results.iter().filter(|r| r.direction == Direction::Negative) {
        let label = catalog.label(&result.metric);
        insights.push(Insight {
            kind: InsightKind::Warning,
            title: format!("{} may be hurting your {}", result.intervention, label),
            description: format!(
                "Your {} moved {:.1}% the wrong way on days with {}. \
                 Consider reviewing its timing or dosage.",
                label,
                result.percent_difference.abs(),
                result.intervention,
            ),
            intervention: Some(result.intervention.clone()),
            metric: Some(result.metric.clone()),
        });
    }

    insights.extend(suggestions(results, registry, catalog));

    debug!(count = insights.len(), "insight generation complete");
    insights
}

/// Trial suggestions: registry entries the user has not tried, where a
/// negative result targets one of the entry's expected metrics. Only
/// entries expected to improve their metrics qualify - an intervention
/// known to worsen a struggling metric is never proposed.
fn suggestions(
    results: &[CorrelationResult],
    registry: &EffectRegistry,
    catalog: &MetricCatalog,
) -> Vec<Insight> {
    let analyzed: BTreeSet<&str> = results.iter().map(|r| r.intervention.as_str()).collect();
    let struggling: BTreeSet<&str> = results
        .iter()
        .filter(|r| r.direction == Direction::Negative)
        .map(|r| r.metric.as_str())
        .collect();

    let mut insights = Vec::new();
    for entry in registry.untried(analyzed.iter().copied()) {
        if entry.expected_direction != Direction::Positive {
            continue;
        }
        let Some(metric) = entry
            .expected_metrics
            .iter()
            .find(|m| struggling.contains(m.as_str()))
        else {
            continue;
        };
        let label = catalog.label(metric);
        insights.push(Insight {
            kind: InsightKind::Suggestion,
            title: format!("Consider trying {}", entry.intervention),
            description: format!(
                "Your {} is trending the wrong way, and {} is known to help it. \
                 Effects typically show within {} days of consistent use.",
                label, entry.intervention, entry.lag_days,
            ),
            intervention: Some(entry.intervention.clone()),
            metric: Some(metric.clone()),
        });
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Significance;

    fn result(
        intervention: &str,
        metric: &str,
        direction: Direction,
        percent_difference: f64,
    ) -> CorrelationResult {
        CorrelationResult {
            intervention: intervention.to_string(),
            metric: metric.to_string(),
            mean_with: 8.0,
            mean_without: 6.0,
            sample_size_with: 7,
            sample_size_without: 7,
            percent_difference,
            direction,
            significance: Significance::High,
            confidence: 90,
        }
    }

    fn defaults() -> (EffectRegistry, MetricCatalog) {
        (EffectRegistry::builtin(), MetricCatalog::builtin())
    }

    #[test]
    fn at_most_three_positive_insights_regardless_of_input() {
        let results: Vec<CorrelationResult> = (0..5)
            .map(|i| result(&format!("supp-{i}"), "sleep_score", Direction::Positive, 20.0))
            .collect();
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        let positives = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Positive)
            .count();
        assert_eq!(positives, 3);
    }

    #[test]
    fn positives_taken_from_front_of_analyzer_order() {
        let results = vec![
            result("a", "sleep_score", Direction::Positive, 30.0),
            result("b", "sleep_score", Direction::Positive, 25.0),
            result("c", "sleep_score", Direction::Positive, 20.0),
            result("d", "sleep_score", Direction::Positive, 15.0),
        ];
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        let ids: Vec<&str> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Positive)
            .map(|i| i.intervention.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn one_warning_per_negative_result_uncapped() {
        let results: Vec<CorrelationResult> = (0..6)
            .map(|i| result(&format!("supp-{i}"), "recovery", Direction::Negative, -12.0))
            .collect();
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        let warnings = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Warning)
            .count();
        assert_eq!(warnings, 6);
    }

    #[test]
    fn suggestion_emitted_for_untried_intervention_targeting_struggling_metric() {
        // Sleep is declining and magnesium was never tried.
        let results = vec![result("late_screen_time", "sleep_score", Direction::Negative, -18.0)];
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        let suggestion = insights
            .iter()
            .find(|i| i.kind == InsightKind::Suggestion)
            .unwrap();
        assert_eq!(suggestion.intervention.as_deref(), Some("magnesium"));
        assert_eq!(suggestion.metric.as_deref(), Some("sleep_score"));
    }

    #[test]
    fn no_suggestion_when_intervention_already_tried_via_alias() {
        let results = vec![result(
            "magnesium-glycinate",
            "sleep_score",
            Direction::Negative,
            -18.0,
        )];
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        assert!(
            !insights
                .iter()
                .any(|i| i.kind == InsightKind::Suggestion
                    && i.intervention.as_deref() == Some("magnesium"))
        );
    }

    #[test]
    fn no_suggestion_for_entry_not_expected_to_improve_its_metric() {
        use crate::registry::KnownEffect;

        let registry = EffectRegistry {
            entries: vec![KnownEffect {
                intervention: "late_workout".to_string(),
                aliases: Vec::new(),
                expected_metrics: vec!["sleep_score".to_string()],
                expected_direction: Direction::Negative,
                lag_days: 0,
            }],
        };
        let results = vec![result("late_caffeine", "sleep_score", Direction::Negative, -18.0)];

        let insights = generate(&results, &registry, &MetricCatalog::builtin());
        assert!(!insights.iter().any(|i| i.kind == InsightKind::Suggestion));
    }

    #[test]
    fn no_suggestion_without_a_negative_result_on_expected_metric() {
        let results = vec![result("creatine", "recovery", Direction::Positive, 15.0)];
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        assert!(!insights.iter().any(|i| i.kind == InsightKind::Suggestion));
    }

    #[test]
    fn output_groups_positive_then_warning_then_suggestion() {
        let results = vec![
            result("creatine", "recovery", Direction::Positive, 15.0),
            result("late_caffeine", "sleep_score", Direction::Negative, -20.0),
        ];
        let (registry, catalog) = defaults();

        let insights = generate(&results, &registry, &catalog);
        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(|k| match k {
            InsightKind::Positive => 0,
            InsightKind::Warning => 1,
            InsightKind::Suggestion => 2,
        });
        assert_eq!(kinds, sorted);
        assert!(kinds.contains(&InsightKind::Positive));
        assert!(kinds.contains(&InsightKind::Warning));
        assert!(kinds.contains(&InsightKind::Suggestion));
    }

    #[test]
    fn empty_results_produce_no_insights() {
        let (registry, catalog) = defaults();
        assert!(generate(&[], &registry, &catalog).is_empty());
    }

    #[test]
    fn insight_serializes_without_null_references() {
        let insight = Insight {
            kind: InsightKind::Suggestion,
            title: "Consider trying magnesium".to_string(),
            description: "...".to_string(),
            intervention: None,
            metric: None,
        };
        let json = serde_json::to_string(&insight).unwrap();
        assert!(!json.contains("intervention"));
        assert!(!json.contains("\"metric\""));
    }
}

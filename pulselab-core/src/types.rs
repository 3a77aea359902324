//! Core input types for the analysis engine.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of biometric measurements from a wearable or health platform.
///
/// A metric absent from the map means "not measured that day" - this is
/// distinct from a recorded value of `0.0`. Callers must supply at most
/// one observation per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day this observation covers
    pub date: NaiveDate,

    /// Metric name -> measured value; missing key = not measured
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,

    /// Where the record came from (e.g., "oura", "whoop", "manual")
    #[serde(default)]
    pub source: String,
}

impl Observation {
    /// Create an observation with no measurements.
    #[must_use]
    pub fn new(date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            date,
            metrics: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Add a measured value, returning `self` for chaining.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// The measured value for a metric, if it was measured that day.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Per-day record of which interventions were active.
///
/// Keys are calendar days, values are the set of opaque intervention
/// identifiers logged for that day. BTree containers keep enumeration
/// order stable so analysis output is reproducible.
pub type InterventionLog = BTreeMap<NaiveDate, BTreeSet<String>>;

/// All distinct intervention identifiers appearing anywhere in the log,
/// in lexicographic order.
#[must_use]
pub fn distinct_interventions(log: &InterventionLog) -> BTreeSet<String> {
    log.values().flatten().cloned().collect()
}

/// Whether an intervention was logged on the given day.
#[must_use]
pub fn intervention_on(log: &InterventionLog, date: NaiveDate, id: &str) -> bool {
    log.get(&date).is_some_and(|set| set.contains(id))
}

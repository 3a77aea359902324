//! Loading of observation and intervention files.
//!
//! Validation lives here, at the boundary: the engine assumes well-formed
//! input, so malformed files must fail loudly before analysis runs.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use pulselab_core::{InterventionLog, Observation};

/// Load a JSON array of observations, ordered or not.
///
/// Rejects duplicate dates - the engine's one-record-per-day precondition
/// is enforced here rather than silently producing wrong statistics.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read observations from {}", path.display()))?;
    let observations: Vec<Observation> =
        serde_json::from_str(&text).context("observations file is not a valid JSON array")?;

    let mut seen: BTreeSet<NaiveDate> = BTreeSet::new();
    for obs in &observations {
        if !seen.insert(obs.date) {
            bail!("duplicate observation for {}", obs.date);
        }
        for (name, value) in &obs.metrics {
            if !value.is_finite() {
                bail!("non-finite value for metric '{}' on {}", name, obs.date);
            }
        }
    }
    Ok(observations)
}

/// Load a JSON object mapping dates to arrays of intervention ids.
pub fn load_interventions(path: &Path) -> Result<InterventionLog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read interventions from {}", path.display()))?;
    serde_json::from_str(&text).context("interventions file is not a valid date -> ids map")
}

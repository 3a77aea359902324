//! Known intervention-effect registry.
//!
//! Static configuration mapping canonical intervention ids to the metrics
//! they are expected to move. Lookup is a separate normalization step:
//! case-insensitive exact match against the canonical id or a listed
//! alias. Substring containment is deliberately not supported - unrelated
//! ids sharing a substring must not collide.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer::Direction;
use crate::config::ConfigError;
use crate::metrics::MetricCatalog;

/// Expected effect profile for one known intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownEffect {
    /// Canonical intervention identifier
    pub intervention: String,

    /// Alternate ids that resolve to this entry (exact, case-insensitive)
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Metrics this intervention is expected to move
    pub expected_metrics: Vec<String>,

    /// Expected direction of the effect on those metrics
    pub expected_direction: Direction,

    /// Days of consistent use before effects typically show
    #[serde(default)]
    pub lag_days: u32,
}

/// Immutable registry of known intervention effects.
///
/// Passed into the insight generator explicitly so tests can substitute
/// alternate registries without shared globals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectRegistry {
    #[serde(default)]
    pub entries: Vec<KnownEffect>,
}

impl EffectRegistry {
    /// Registry of commonly tracked interventions and the metrics the
    /// tracking literature associates them with.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |intervention: &str,
                     aliases: &[&str],
                     expected_metrics: &[&str],
                     lag_days: u32| KnownEffect {
            intervention: intervention.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            expected_metrics: expected_metrics.iter().map(ToString::to_string).collect(),
            expected_direction: Direction::Positive,
            lag_days,
        };
        Self {
            entries: vec![
                entry(
                    "magnesium",
                    &["magnesium-glycinate", "magnesium-citrate"],
                    &["sleep_score", "hrv"],
                    3,
                ),
                entry("meditation", &["mindfulness"], &["stress", "hrv"], 7),
                entry("ashwagandha", &[], &["stress"], 14),
                entry("creatine", &["creatine-monohydrate"], &["recovery"], 7),
                entry(
                    "omega_3",
                    &["fish-oil", "omega-3"],
                    &["hrv", "resting_heart_rate"],
                    14,
                ),
            ],
        }
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Check that every expected metric is defined in the catalog.
    ///
    /// A registry referencing an undefined metric would silently never
    /// produce suggestions for it, so the mismatch surfaces at load time.
    pub fn validate(&self, catalog: &MetricCatalog) -> Result<(), ConfigError> {
        for entry in &self.entries {
            for metric in &entry.expected_metrics {
                if catalog.get(metric).is_none() {
                    return Err(ConfigError::UnknownMetric(metric.clone()));
                }
            }
        }
        Ok(())
    }

    /// Resolve an intervention id to its registry entry.
    ///
    /// Exact match against the canonical id or an alias, ignoring ASCII
    /// case. Never matches on substrings.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<&KnownEffect> {
        self.entries.iter().find(|e| {
            e.intervention.eq_ignore_ascii_case(id)
                || e.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
        })
    }

    /// Entries whose canonical id does not resolve from any of the given
    /// intervention ids. These are trial candidates for suggestions.
    #[must_use]
    pub fn untried<'a, I>(&self, tried: I) -> Vec<&KnownEffect>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        self.entries
            .iter()
            .filter(|e| {
                !tried.clone().into_iter().any(|id| {
                    self.resolve(id)
                        .is_some_and(|r| r.intervention == e.intervention)
                })
            })
            .collect()
    }
}

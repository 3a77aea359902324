//! CLI command implementations.

pub mod analyze;
pub mod score;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pulselab_core::{
    AnalysisConfig, AnalysisReport, EffectRegistry, MetricCatalog, run_analysis,
};

use crate::input;

/// Input files shared by every command.
#[derive(Args, Debug)]
pub struct EngineInputs {
    /// Observations JSON file (array of {date, metrics, source})
    #[arg(long)]
    pub observations: PathBuf,

    /// Interventions JSON file (map of date -> [intervention ids])
    #[arg(long)]
    pub interventions: PathBuf,

    /// Analysis thresholds TOML; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Known-effect registry TOML; built-in registry when omitted
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Metric catalog TOML; built-in catalog when omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Override the rolling window length in days
    #[arg(long)]
    pub window: Option<usize>,
}

impl EngineInputs {
    /// Load all inputs and run the full pipeline.
    pub fn run_pipeline(&self) -> Result<AnalysisReport> {
        let observations = input::load_observations(&self.observations)?;
        let interventions = input::load_interventions(&self.interventions)?;

        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(window) = self.window {
            config.window_days = window;
        }
        let registry = match &self.registry {
            Some(path) => EffectRegistry::load(path)?,
            None => EffectRegistry::builtin(),
        };
        let catalog = match &self.catalog {
            Some(path) => MetricCatalog::load(path)?,
            None => MetricCatalog::builtin(),
        };
        registry.validate(&catalog)?;

        Ok(run_analysis(
            &observations,
            &interventions,
            &catalog,
            &registry,
            &config,
        ))
    }
}

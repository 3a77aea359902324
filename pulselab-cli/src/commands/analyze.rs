//! Full analysis command: correlations, insights, and score.

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use pulselab_core::{AnalysisReport, InsightKind};
use tracing::info;

use super::EngineInputs;

/// Analyze command arguments
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub inputs: EngineInputs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// The three artifacts as one JSON document
    Json,
}

/// Run the analyze command
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let report = args.inputs.run_pipeline()?;
    info!(
        correlations = report.correlations.len(),
        insights = report.insights.len(),
        "analysis complete"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    if report.correlations.is_empty() {
        println!("No screened correlations - not enough history or too few samples per group.");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Intervention",
            "Metric",
            "Direction",
            "Significance",
            "Confidence",
            "Change",
            "Days",
        ]);
        for r in &report.correlations {
            table.add_row(vec![
                r.intervention.clone(),
                r.metric.clone(),
                format!("{:?}", r.direction).to_lowercase(),
                format!("{:?}", r.significance).to_lowercase(),
                r.confidence.to_string(),
                format!("{:+.1}%", r.percent_difference),
                format!("{}/{}", r.sample_size_with, r.sample_size_without),
            ]);
        }
        println!("{table}");
    }

    if !report.insights.is_empty() {
        println!();
        for insight in &report.insights {
            let tag = match insight.kind {
                InsightKind::Positive => "+",
                InsightKind::Warning => "!",
                InsightKind::Suggestion => "?",
            };
            println!("[{tag}] {}", insight.title);
            println!("    {}", insight.description);
        }
    }

    println!();
    println!(
        "Effectiveness: {} ({:?}) - {}",
        report.effectiveness.score, report.effectiveness.grade, report.effectiveness.summary
    );
}

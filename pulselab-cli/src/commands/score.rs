//! Effectiveness score command.

use anyhow::Result;
use clap::Args;

use super::EngineInputs;

/// Score command arguments
#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub inputs: EngineInputs,

    /// Print the score as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the score command
pub fn run(args: ScoreArgs) -> Result<()> {
    let report = args.inputs.run_pipeline()?;
    let effectiveness = &report.effectiveness;

    if args.json {
        println!("{}", serde_json::to_string_pretty(effectiveness)?);
    } else {
        println!(
            "{} ({:?}) - {}",
            effectiveness.score, effectiveness.grade, effectiveness.summary
        );
    }
    Ok(())
}

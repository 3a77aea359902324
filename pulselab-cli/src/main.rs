use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "pulselab", about = "Screen daily interventions against biometric trends")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: correlations, insights, and score
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print only the aggregate effectiveness score
    Score(commands::score::ScoreArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Score(args) => commands::score::run(args),
    }
}

//! Check command - print statistics and scores of an existing schedule

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seatplan_solve::ScoreWeights;

use seatplan_cli::loader::load_schedule;
use seatplan_cli::output::{render_configuration, render_final};

use crate::TournamentArgs;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub tournament: TournamentArgs,

    /// Schedule file: player table lists, or a JSON export
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file with weight tables to score the schedule with
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,
}

/// Run check command
pub fn run(args: CheckArgs) -> Result<()> {
    let config = args.tournament.configuration()?;
    println!("{}", render_configuration(&config));

    let schedule = load_schedule(&config, &args.file)?;
    print!("{}", render_final(&schedule));

    let weights = match &args.weights {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse weights in {}", path.display()))?
        }
        None => ScoreWeights::default(),
    };

    println!("\nPlayer score: {:.4}", weights.players.score(&schedule));
    println!("Seat score:   {:.4}", weights.seats.score(&schedule));

    if !schedule.verify() {
        anyhow::bail!("{} is not a valid schedule", args.file.display());
    }
    tracing::info!("{} is valid", args.file.display());

    Ok(())
}

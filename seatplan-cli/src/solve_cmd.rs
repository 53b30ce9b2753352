//! Solve command - build a schedule, balance opponents, then seats
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: player_schedule(), seat_schedule(), finish()
//! - Level 3: load_weights(), build configs
//! - Level 4: argument definitions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seatplan_core::{Configuration, Schedule};
use seatplan_solve::{
    solve_players, solve_seats, PlayerScore, PlayerSolveConfig, ScoreWeights, SeatScore,
    SeatSolveConfig,
};

use seatplan_cli::export::ScheduleExport;
use seatplan_cli::loader::load_schedule;
use seatplan_cli::output::{render_configuration, render_final, render_short_player_optimization};

use crate::TournamentArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    #[command(flatten)]
    pub tournament: TournamentArgs,

    /// Skip player optimization and load the placement from a file
    #[arg(long, value_name = "FILE")]
    pub custom: Option<PathBuf>,

    /// Run seat optimization after player placement
    #[arg(long)]
    pub optimize_seats: bool,

    /// Distance between starting shifts (0 = a single starting schedule)
    #[arg(long, default_value = "0")]
    pub player_step: usize,

    /// Optimization runs per starting shift
    #[arg(long, default_value = "3")]
    pub stages: usize,

    /// Hill-climbing trials per run
    #[arg(long, default_value = "1000000")]
    pub iterations: usize,

    /// Independent seat optimization runs
    #[arg(long, default_value = "50")]
    pub seat_attempts: usize,

    /// Stages per seat optimization run
    #[arg(long, default_value = "2")]
    pub seat_stages: usize,

    /// Shuffle trials per seat stage
    #[arg(long, default_value = "800000")]
    pub shuffles: usize,

    /// Seat switch trials per seat stage
    #[arg(long, default_value = "400000")]
    pub switches: usize,

    /// Penalty per pair meet count, e.g. 500,5,0,0,0,2,10
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub pair_weights: Option<Vec<f64>>,

    /// Seat score weights: half,band,edge
    #[arg(long, value_delimiter = ',', num_args = 3)]
    pub seat_weights: Option<Vec<f64>>,

    /// JSON file with both weight tables
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Write the final schedule as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
pub fn run(args: SolveArgs, seed: Option<u64>) -> Result<()> {
    let config = args.tournament.configuration()?;
    println!("{}", render_configuration(&config));

    let weights = load_weights(&args)?;

    let (players, player_score) = player_schedule(&config, &args, &weights.players, seed)?;

    let (schedule, score) = if args.optimize_seats {
        let (schedule, score) = seat_schedule(&players, &args, &weights.seats, seed);
        (schedule, Some(score))
    } else {
        println!("\n*** Seat optimization skipped");
        (players, player_score)
    };

    finish(&schedule, score, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Optimize opponents, or load a ready placement
fn player_schedule(
    config: &Configuration,
    args: &SolveArgs,
    scorer: &PlayerScore,
    seed: Option<u64>,
) -> Result<(Schedule, Option<f64>)> {
    if let Some(path) = &args.custom {
        println!("*** Loading custom schedule...");
        let schedule = load_schedule(config, path)?;
        return Ok((schedule, None));
    }

    println!("\n*** Optimize player opponents");
    let solve = PlayerSolveConfig {
        player_step: args.player_step,
        stages: args.stages,
        iterations: args.iterations,
        seed,
    };

    let mut best_score = f64::MAX;
    let result = solve_players(config, &solve, scorer, |schedule, score| {
        if score < best_score {
            best_score = score;
            println!("\n*** Best schedule at the moment, score: {:8.4}", score);
            print!("{}", render_short_player_optimization(schedule));
        }
        true
    })?
    .context("No player optimization runs were made, check --stages")?;

    Ok((result.schedule, Some(result.score)))
}

/// Optimize seat order of a fixed placement
fn seat_schedule(
    players: &Schedule,
    args: &SolveArgs,
    scorer: &SeatScore,
    seed: Option<u64>,
) -> (Schedule, f64) {
    println!("\n*** Optimize seats");
    let solve = SeatSolveConfig {
        attempts: args.seat_attempts,
        stages: args.seat_stages,
        shuffles_per_stage: args.shuffles,
        switches_per_stage: args.switches,
        seed,
    };

    let result = solve_seats(players, &solve, scorer, |_, score| {
        println!("\n*** Current best SEAT schedule, score: {:8.4}", score);
        true
    });

    (result.schedule, result.score)
}

/// Print, verify and export the final schedule
fn finish(schedule: &Schedule, score: Option<f64>, args: &SolveArgs) -> Result<()> {
    println!("\n*** Final schedule");
    print!("{}", render_final(schedule));

    if !schedule.verify() {
        anyhow::bail!("Final schedule is not valid: players play different numbers of games");
    }

    if let Some(path) = &args.json {
        ScheduleExport::from_schedule(schedule, score).save(path)?;
        tracing::info!("Saved schedule to {}", path.display());
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Weight tables from file, overridden by command-line lists
fn load_weights(args: &SolveArgs) -> Result<ScoreWeights> {
    let mut weights = match &args.weights {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse weights in {}", path.display()))?
        }
        None => ScoreWeights::default(),
    };

    if let Some(pair_weights) = &args.pair_weights {
        weights.players = PlayerScore::new(pair_weights.clone());
    }

    if let Some(seat_weights) = &args.seat_weights {
        if let [half, band, edge] = seat_weights[..] {
            weights.seats = SeatScore::new(half, band, edge);
        } else {
            anyhow::bail!("--seat-weights takes exactly three values: half,band,edge");
        }
    }

    tracing::debug!("Score weights: {:?}", weights);
    Ok(weights)
}

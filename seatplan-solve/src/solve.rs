//! Multi-start optimization runs
//!
//! Level 1/2 - Orchestration and phases
//!
//! Every run works on its own schedule copy, so keeping the best of many
//! runs never needs to undo anything.

use seatplan_core::{Configuration, RandomOptimizer, Schedule, ScheduleError, SeatOptimizer};

use crate::config::{run_rng, PlayerSolveConfig, SeatSolveConfig};
use crate::scoring::{PlayerScore, SeatScore};

/// Best schedule found by a search
#[derive(Clone, Debug)]
pub struct SolveResult {
    /// Best schedule found
    pub schedule: Schedule,
    /// Score of the best schedule
    pub score: f64,
    /// Highest final score among all runs
    pub worst_score: f64,
    /// Number of completed runs
    pub runs: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Optimize opponents starting from round-robin schedules
///
/// For every starting shift, `stages` independent runs are made. `on_result`
/// sees every finished run; returning `false` stops the search.
/// Returns `None` when no run was made.
pub fn solve_players<F>(
    config: &Configuration,
    solve: &PlayerSolveConfig,
    scorer: &PlayerScore,
    mut on_result: F,
) -> Result<Option<SolveResult>, ScheduleError>
where
    F: FnMut(&Schedule, f64) -> bool,
{
    tracing::info!(
        "Player optimization: shifts={:?}, stages={}, iterations={}",
        solve.shifts(config.num_players()),
        solve.stages,
        solve.iterations
    );

    let mut best: Option<SolveResult> = None;
    let mut run = 0u64;

    'search: for shift in solve.shifts(config.num_players()) {
        tracing::info!("Player shift: {}", shift);

        for stage in 0..solve.stages {
            let mut schedule = Schedule::create_initial_schedule(config, shift)?;
            let score = optimize_players(&mut schedule, solve, scorer, run, stage);
            run += 1;

            record(&mut best, &schedule, score);

            if !on_result(&schedule, score) {
                break 'search;
            }
        }
    }

    log_summary(&best);
    Ok(best)
}

/// Optimize seat order of a fixed player placement
///
/// Runs `attempts` independent optimizations on copies of `initial` and
/// keeps the best. `on_improvement` is called whenever a run beats the best
/// so far; returning `false` stops the search.
pub fn solve_seats<F>(
    initial: &Schedule,
    solve: &SeatSolveConfig,
    scorer: &SeatScore,
    mut on_improvement: F,
) -> SolveResult
where
    F: FnMut(&Schedule, f64) -> bool,
{
    tracing::info!(
        "Seat optimization: attempts={}, stages={}, shuffles={}, switches={}",
        solve.attempts,
        solve.stages,
        solve.shuffles_per_stage,
        solve.switches_per_stage
    );

    let initial_score = scorer.score(initial);
    let mut best = SolveResult {
        schedule: initial.clone(),
        score: initial_score,
        worst_score: initial_score,
        runs: 0,
    };

    for attempt in 0..solve.attempts {
        let mut schedule = initial.clone();
        let score = optimize_seats(&mut schedule, solve, scorer, attempt);

        best.runs += 1;
        best.worst_score = best.worst_score.max(score);

        if score < best.score {
            best.score = score;
            best.schedule = schedule;
            if !on_improvement(&best.schedule, best.score) {
                break;
            }
        }
    }

    tracing::info!("Best seat score: {:.4}", best.score);
    best
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// One player-placement run
fn optimize_players(
    schedule: &mut Schedule,
    solve: &PlayerSolveConfig,
    scorer: &PlayerScore,
    run: u64,
    stage: usize,
) -> f64 {
    let rng = run_rng(solve.seed, run);
    let mut optimizer = RandomOptimizer::new(schedule, solve.iterations, |s: &Schedule| scorer.score(s), rng);
    let score = optimizer.optimize();

    tracing::info!(
        "Stage: {:3}. Score: {:10.2}. Iterations: {:10} / {:10}",
        stage,
        score,
        optimizer.good_iterations(),
        optimizer.total_iterations()
    );

    score
}

/// One seat-order run
fn optimize_seats(schedule: &mut Schedule, solve: &SeatSolveConfig, scorer: &SeatScore, attempt: usize) -> f64 {
    let rng = run_rng(solve.seed, attempt as u64);
    let mut optimizer = SeatOptimizer::new(
        schedule,
        solve.stages,
        solve.shuffles_per_stage,
        solve.switches_per_stage,
        |s: &Schedule| scorer.score(s),
        rng,
    );
    let score = optimizer.optimize();
    let stats = optimizer.stats();

    tracing::info!(
        "Attempt {:3}: score={:.4} good shuffles: {} good switches: {}",
        attempt,
        score,
        stats.good_shuffles,
        stats.good_switches
    );

    score
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn record(best: &mut Option<SolveResult>, schedule: &Schedule, score: f64) {
    if let Some(result) = best.as_mut() {
        result.runs += 1;
        result.worst_score = result.worst_score.max(score);
        if score < result.score {
            result.score = score;
            result.schedule = schedule.clone();
        }
        return;
    }

    *best = Some(SolveResult {
        schedule: schedule.clone(),
        score,
        worst_score: score,
        runs: 1,
    });
}

fn log_summary(best: &Option<SolveResult>) {
    match best {
        Some(result) => {
            tracing::info!("Best score: {:.4}", result.score);
            tracing::info!("Worst score: {:.4}", result.worst_score);
        }
        None => tracing::warn!("No optimization runs were made"),
    }
}

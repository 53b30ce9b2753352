//! Seatplan Solve - optimization runs over tournament schedules
//!
//! This crate drives the core optimizers:
//! - Score functions with caller-supplied penalty weights
//! - Multi-start player placement (several seeding shifts, several stages)
//! - Best-of-N seat order optimization
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: solve_players, solve_seats (orchestration)
//! - Level 2: single optimization runs (phases)
//! - Level 3: scoring, result bookkeeping (steps)
//! - Level 4: configuration

mod config;
mod scoring;
mod solve;

pub use config::{PlayerSolveConfig, SeatSolveConfig};
pub use scoring::{PlayerScore, ScoreWeights, SeatScore};
pub use solve::{solve_players, solve_seats, SolveResult};

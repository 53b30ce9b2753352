//! Seatplan Core - schedule model and optimizers
//!
//! This crate provides the core of the tournament seating planner:
//! - Tournament configuration (players, rounds, tables, games)
//! - Games, rounds and schedules with legal swap primitives
//! - Metrics: seat and opponent histograms, summary statistics
//! - Hill-climbing optimizers for player placement and seat order

pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod random_optimizer;
pub mod round;
pub mod schedule;
pub mod seat_optimizer;

// Re-exports for convenient access
pub use config::{
    Configuration, PlayerId, SeatId, INVALID_PLAYER_ID, INVALID_SEAT_ID, NO_TABLE, NUM_SEATS,
};
pub use error::{ConfigError, ScheduleError};
pub use game::{Game, Seats};
pub use metrics::Metrics;
pub use random_optimizer::{RandomOptimizer, MAX_SWAP_ATTEMPTS};
pub use round::Round;
pub use schedule::Schedule;
pub use seat_optimizer::{SeatOptimizer, SeatStats};

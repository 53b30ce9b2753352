//! Tournament parameters and id types

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of seats at every table
pub const NUM_SEATS: usize = 10;

/// Minimum number of players a tournament can have (one full table)
pub const MIN_PLAYERS: usize = NUM_SEATS;

/// Id of a player, 0-based
pub type PlayerId = u16;

/// Seat position within a game, 0-based
pub type SeatId = u8;

/// Marks a seat nobody has been put on yet
pub const INVALID_PLAYER_ID: PlayerId = PlayerId::MAX;

/// Marks a player that does not take part in a game
pub const INVALID_SEAT_ID: SeatId = SeatId::MAX;

/// Player-table lists use this value for a round the player sits out
pub const NO_TABLE: i32 = -1;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Immutable tournament parameters
///
/// Every game seats exactly [`NUM_SEATS`] players, so the parameters are
/// tied together by `attempts * players == NUM_SEATS * games`. The last
/// round may be partial: `games` lies in `((rounds - 1) * tables, rounds * tables]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    players: usize,
    rounds: usize,
    tables: usize,
    games: usize,
    attempts: usize,
}

impl Configuration {
    /// Create a configuration without validating it
    pub fn new(players: usize, rounds: usize, tables: usize, games: usize, attempts: usize) -> Self {
        Self {
            players,
            rounds,
            tables,
            games,
            attempts,
        }
    }

    /// Validate raw tournament parameters and derive the games per player
    pub fn from_params(
        players: usize,
        rounds: usize,
        tables: usize,
        games: usize,
    ) -> Result<Self, ConfigError> {
        if players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers { players, min: MIN_PLAYERS });
        }
        if rounds < 1 {
            return Err(ConfigError::NoRounds);
        }
        if tables < 1 {
            return Err(ConfigError::NoTables);
        }
        if players > INVALID_PLAYER_ID as usize {
            return Err(ConfigError::TooManyPlayers { players, max: INVALID_PLAYER_ID as usize });
        }

        let low = (rounds - 1) * tables;
        let high = rounds * tables;
        if games <= low || games > high {
            return Err(ConfigError::GamesOutOfRange { games, low, high });
        }

        if (NUM_SEATS * games) % players != 0 {
            return Err(ConfigError::UnevenAttempts { games, players });
        }

        Ok(Self::new(players, rounds, tables, games, NUM_SEATS * games / players))
    }

    /// Number of games when every round is full
    pub fn default_games(rounds: usize, tables: usize) -> usize {
        rounds * tables
    }

    /// Number of players in the tournament
    pub fn num_players(&self) -> usize {
        self.players
    }

    /// Number of rounds
    pub fn num_rounds(&self) -> usize {
        self.rounds
    }

    /// Max number of tables in every round
    pub fn num_tables(&self) -> usize {
        self.tables
    }

    /// Total number of games in the tournament
    pub fn num_games(&self) -> usize {
        self.games
    }

    /// Number of games every player plays
    pub fn num_attempts(&self) -> usize {
        self.attempts
    }

    /// Ideal number of meetings for every pair of players
    pub fn opponent_target(&self) -> f64 {
        (NUM_SEATS - 1) as f64 * self.attempts as f64 / (self.players - 1) as f64
    }

    /// Ideal number of times every player takes each seat
    pub fn seat_target(&self) -> f64 {
        self.attempts as f64 / NUM_SEATS as f64
    }

    /// Half-open range of game indices that belong to `round`
    pub fn round_range(&self, round: usize) -> std::ops::Range<usize> {
        let low = (round * self.tables).min(self.games);
        let high = ((round + 1) * self.tables).min(self.games);
        low..high
    }
}

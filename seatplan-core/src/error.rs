//! Error types for building configurations and schedules

/// Rejected tournament parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Number of players must be at least {min}, got {players}")]
    TooFewPlayers { players: usize, min: usize },

    #[error("Number of players must not exceed {max}, got {players}")]
    TooManyPlayers { players: usize, max: usize },

    #[error("Number of rounds must be positive")]
    NoRounds,

    #[error("Number of tables must be positive")]
    NoTables,

    #[error("Number of games {games} is outside of ({low}, {high}]")]
    GamesOutOfRange { games: usize, low: usize, high: usize },

    #[error("Parameters mismatch: 10 * games ({games}) is not divisible by players ({players})")]
    UnevenAttempts { games: usize, players: usize },
}

/// Rejected game or schedule construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Can not create a schedule, expected {expected} games, got {actual}")]
    GameCount { expected: usize, actual: usize },

    #[error("Can not create game {game}, expected {expected} seats, got {actual}")]
    SeatCount { game: usize, expected: usize, actual: usize },

    #[error("Game {game} seats player {player}, but there are only {players} players")]
    PlayerOutOfRange { game: usize, player: usize, players: usize },

    #[error("Game {game} seats player {player} more than once")]
    DuplicatePlayer { game: usize, player: usize },

    #[error("Expected table lists for {expected} players, got {actual}")]
    PlayerCount { expected: usize, actual: usize },

    #[error("Player {player} has {actual} round entries, expected {expected}")]
    PlayerTablesLength { player: usize, expected: usize, actual: usize },

    #[error("Player {player} sits at table {table} in round {round}, but the round has {tables} tables")]
    TableOutOfRange { player: usize, round: usize, table: i32, tables: usize },
}

impl ScheduleError {
    /// Attach the index of the game the error was raised for
    pub fn at_game(self, index: usize) -> Self {
        match self {
            ScheduleError::SeatCount { expected, actual, .. } => {
                ScheduleError::SeatCount { game: index, expected, actual }
            }
            ScheduleError::PlayerOutOfRange { player, players, .. } => {
                ScheduleError::PlayerOutOfRange { game: index, player, players }
            }
            ScheduleError::DuplicatePlayer { player, .. } => {
                ScheduleError::DuplicatePlayer { game: index, player }
            }
            other => other,
        }
    }
}

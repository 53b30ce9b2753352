//! Games played at the same time

use std::ops::Range;

/// A set of games played simultaneously
///
/// Holds a range of indices into the owning schedule's game storage, so a
/// copied schedule gets rounds that point at its own games.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    games: Range<usize>,
}

impl Round {
    pub fn new(games: Range<usize>) -> Self {
        Self { games }
    }

    /// Indices of the games in this round
    pub fn game_indices(&self) -> Range<usize> {
        self.games.clone()
    }

    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    pub fn contains(&self, game: usize) -> bool {
        self.games.contains(&game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    #[test]
    fn test_round_range() {
        let round = Round::new(4..6);
        assert_eq!(round.game_indices(), 4..6);
        assert_eq!(round.num_games(), 2);
        assert!(round.contains(4));
        assert!(round.contains(5));
        assert!(!round.contains(6));
        assert!(!round.contains(3));
    }

    #[test]
    fn test_partial_last_round() {
        // 3 tables, 8 games: the third round only has two
        let conf = Configuration::new(30, 3, 3, 8, 0);
        let last = Round::new(conf.round_range(2));
        assert_eq!(last.game_indices(), 6..8);
        assert_eq!(last.num_games(), 2);
        assert!(!last.contains(8));
    }
}

//! Statistics over a schedule
//!
//! Histograms are computed on demand and never cached. The helper functions
//! take an `exclude` index so a player's own entry in their opponent
//! histogram never counts.

use crate::config::{PlayerId, NUM_SEATS};
use crate::schedule::Schedule;

/// Read-only view of a schedule for computing statistics
#[derive(Clone, Copy, Debug)]
pub struct Metrics<'a> {
    schedule: &'a Schedule,
}

impl<'a> Metrics<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        Self { schedule }
    }

    /// How many times `player` sat on each seat
    pub fn calc_player_seats_histogram(&self, player: PlayerId) -> [usize; NUM_SEATS] {
        let mut seats = [0; NUM_SEATS];
        for game in self.schedule.games() {
            if let Some(seat) = game.seat_of(player) {
                seats[seat as usize] += 1;
            }
        }
        seats
    }

    /// How many games `player` shared with every other player
    ///
    /// The entry for `player` itself equals the number of games they play.
    pub fn calc_player_opponents_histogram(&self, player: PlayerId) -> Vec<usize> {
        let mut opponents = vec![0; self.schedule.config().num_players()];
        for game in self.schedule.games().iter().filter(|g| g.participates(player)) {
            for &id in game.seats() {
                if let Some(count) = opponents.get_mut(id as usize) {
                    *count += 1;
                }
            }
        }
        opponents
    }

    /// `counts[k]` = number of unordered player pairs that share `k` games
    pub fn pairs_histogram(&self) -> Vec<usize> {
        let config = self.schedule.config();
        let mut counts = vec![0; config.num_attempts() + 1];

        for player in 0..config.num_players() {
            let opponents = self.calc_player_opponents_histogram(player as PlayerId);
            for &together in &opponents[..player] {
                if together >= counts.len() {
                    counts.resize(together + 1, 0);
                }
                counts[together] += 1;
            }
        }

        counts
    }

    // ========================================================================
    // Aggregate helpers
    // ========================================================================

    /// Sum of `f(value)` over all entries except `exclude`
    pub fn aggregate<F>(values: &[usize], exclude: Option<usize>, f: F) -> f64
    where
        F: Fn(usize) -> f64,
    {
        included(values, exclude).map(f).sum()
    }

    /// Number of zero entries
    pub fn calc_zeros(values: &[usize], exclude: Option<usize>) -> usize {
        included(values, exclude).filter(|&v| v == 0).count()
    }

    /// Smallest entry, 0 when nothing is left after excluding
    pub fn calc_min(values: &[usize], exclude: Option<usize>) -> usize {
        included(values, exclude).min().unwrap_or(0)
    }

    /// Largest entry, 0 when nothing is left after excluding
    pub fn calc_max(values: &[usize], exclude: Option<usize>) -> usize {
        included(values, exclude).max().unwrap_or(0)
    }

    pub fn calc_average(values: &[usize], exclude: Option<usize>) -> f64 {
        let count = included(values, exclude).count();
        if count == 0 {
            return 0.0;
        }
        included(values, exclude).sum::<usize>() as f64 / count as f64
    }

    /// Mean squared distance of the entries from their average
    pub fn calc_square_deviation(values: &[usize], exclude: Option<usize>) -> f64 {
        let average = Self::calc_average(values, exclude);
        Self::calc_square_deviation_to(values, exclude, average)
    }

    /// Mean squared distance of the entries from `target`
    pub fn calc_square_deviation_to(values: &[usize], exclude: Option<usize>, target: f64) -> f64 {
        let count = included(values, exclude).count();
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = included(values, exclude)
            .map(|v| {
                let d = v as f64 - target;
                d * d
            })
            .sum();
        sum / count as f64
    }
}

fn included(values: &[usize], exclude: Option<usize>) -> impl Iterator<Item = usize> + '_ {
    values
        .iter()
        .enumerate()
        .filter(move |&(idx, _)| Some(idx) != exclude)
        .map(|(_, &v)| v)
}

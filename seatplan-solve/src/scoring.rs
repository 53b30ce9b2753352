//! Score functions for the optimizers
//!
//! Level 3 - Steps
//!
//! Both scores are "lower is better". Penalty weights are tuned per
//! tournament, so they always come from the caller.

use serde::{Deserialize, Serialize};

use seatplan_core::{Metrics, PlayerId, Schedule, NUM_SEATS};

/// Opponent-balance score
///
/// Sum over players of the square deviation of their opponent counts from
/// the ideal `9 * attempts / (players - 1)`, plus `pair_weights[n]` for
/// every opponent met `n` times.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Penalty per meet count; counts past the end reuse the last entry
    #[serde(default)]
    pub pair_weights: Vec<f64>,
}

impl PlayerScore {
    pub fn new(pair_weights: Vec<f64>) -> Self {
        Self { pair_weights }
    }

    pub fn score(&self, schedule: &Schedule) -> f64 {
        let metrics = Metrics::new(schedule);
        let conf = schedule.config();
        let target = conf.opponent_target();

        let mut penalty = 0.0;
        let mut pair_penalty = 0.0;
        for player in 0..conf.num_players() {
            let opponents = metrics.calc_player_opponents_histogram(player as PlayerId);
            penalty += Metrics::calc_square_deviation_to(&opponents, Some(player), target);

            if !self.pair_weights.is_empty() {
                pair_penalty += Metrics::aggregate(&opponents, Some(player), |n| self.pair_weight(n));
            }
        }

        penalty + pair_penalty
    }

    fn pair_weight(&self, count: usize) -> f64 {
        let idx = count.min(self.pair_weights.len() - 1);
        self.pair_weights[idx]
    }
}

/// Seat-balance score
///
/// Sum over players of the square deviation of their seat histogram from
/// `attempts / 10`. Optional weighted terms pull the share of seats 1-5 vs
/// 6-10 to 50/50, seats 1-3 / 4-7 / 8-10 to 30/40/30 and seats 1 and 10
/// to 10% each.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatScore {
    pub half_weight: f64,
    pub band_weight: f64,
    pub edge_weight: f64,
}

impl SeatScore {
    pub fn new(half_weight: f64, band_weight: f64, edge_weight: f64) -> Self {
        Self {
            half_weight,
            band_weight,
            edge_weight,
        }
    }

    pub fn score(&self, schedule: &Schedule) -> f64 {
        let metrics = Metrics::new(schedule);
        let conf = schedule.config();
        let target = conf.seat_target();

        let mut deviation = 0.0;
        let mut half = 0.0;
        let mut band = 0.0;
        let mut edge = 0.0;
        for player in 0..conf.num_players() {
            let seats = metrics.calc_player_seats_histogram(player as PlayerId);
            deviation += Metrics::calc_square_deviation_to(&seats, None, target);

            let total = seats.iter().sum::<usize>();
            if total == 0 {
                continue;
            }
            let share = |range: std::ops::Range<usize>| {
                seats[range].iter().sum::<usize>() as f64 / total as f64
            };

            half += square(share(0..5) - 0.5) + square(share(5..NUM_SEATS) - 0.5);
            band += square(share(0..3) - 0.3) + square(share(3..7) - 0.4) + square(share(7..NUM_SEATS) - 0.3);
            edge += square(share(0..1) - 0.1) + square(share(NUM_SEATS - 1..NUM_SEATS) - 0.1);
        }

        deviation + self.half_weight * half + self.band_weight * band + self.edge_weight * edge
    }
}

fn square(x: f64) -> f64 {
    x * x
}

/// Weight tables for both scores, loadable from JSON
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub players: PlayerScore,
    pub seats: SeatScore,
}

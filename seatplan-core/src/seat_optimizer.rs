//! Hill climbing over seat positions
//!
//! Only reorders seats inside games, so who plays with whom never changes.
//! Each stage runs three kinds of trials: shuffle one game, switch two seats
//! in one game, shuffle two games at once.

use rand::Rng;

use crate::config::NUM_SEATS;
use crate::schedule::Schedule;

/// Counters of one optimization run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeatStats {
    pub shuffle_trials: usize,
    pub good_shuffles: usize,
    pub switch_trials: usize,
    pub good_switches: usize,
}

/// Seat-order hill climber
///
/// The score function is supplied by the caller; lower is better.
pub struct SeatOptimizer<'a, F, R> {
    schedule: &'a mut Schedule,
    max_stages: usize,
    shuffles_per_stage: usize,
    switches_per_stage: usize,
    score_fn: F,
    rng: R,
    stats: SeatStats,
}

impl<'a, F, R> SeatOptimizer<'a, F, R>
where
    F: FnMut(&Schedule) -> f64,
    R: Rng,
{
    pub fn new(
        schedule: &'a mut Schedule,
        max_stages: usize,
        shuffles_per_stage: usize,
        switches_per_stage: usize,
        score_fn: F,
        rng: R,
    ) -> Self {
        Self {
            schedule,
            max_stages,
            shuffles_per_stage,
            switches_per_stage,
            score_fn,
            rng,
            stats: SeatStats::default(),
        }
    }

    /// Run all stages and return the final score
    pub fn optimize(&mut self) -> f64 {
        for stage in 0..self.max_stages {
            let mut good_shuffles = 0;
            let mut good_switches = 0;

            for _ in 0..self.shuffles_per_stage {
                let game = self.schedule.generate_random_game(&mut self.rng);
                good_shuffles += self.shuffle_game(game) as usize;
            }

            for _ in 0..self.switches_per_stage {
                let game = self.schedule.generate_random_game(&mut self.rng);
                good_switches += self.switch_two_seats(game) as usize;
            }

            for _ in 0..self.shuffles_per_stage {
                if let Some((one, two)) = self.two_distinct_games() {
                    good_shuffles += self.shuffle_games(one, two) as usize;
                }
            }

            self.stats.shuffle_trials += 2 * self.shuffles_per_stage;
            self.stats.switch_trials += self.switches_per_stage;
            self.stats.good_shuffles += good_shuffles;
            self.stats.good_switches += good_switches;

            let score = (self.score_fn)(&*self.schedule);
            tracing::debug!(
                "Stage #{}: score={:.2} good shuffle iterations: {} good switch iterations: {}",
                stage,
                score,
                good_shuffles,
                good_switches
            );
        }

        (self.score_fn)(&*self.schedule)
    }

    pub fn stats(&self) -> SeatStats {
        self.stats
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Permute all seats of one game
    pub fn shuffle_game(&mut self, game: usize) -> bool {
        let score_before = (self.score_fn)(&*self.schedule);
        let old_seats = *self.schedule.game(game).seats();
        self.schedule.game_mut(game).shuffle_seats(&mut self.rng);
        let score_after = (self.score_fn)(&*self.schedule);

        if score_after >= score_before {
            self.schedule.game_mut(game).set_seats(old_seats);
            return false;
        }

        true
    }

    /// Permute seats of two games independently, kept or reverted together
    pub fn shuffle_games(&mut self, game_one: usize, game_two: usize) -> bool {
        if game_one == game_two {
            return false;
        }

        let score_before = (self.score_fn)(&*self.schedule);
        let old_one = *self.schedule.game(game_one).seats();
        let old_two = *self.schedule.game(game_two).seats();
        self.schedule.game_mut(game_one).shuffle_seats(&mut self.rng);
        self.schedule.game_mut(game_two).shuffle_seats(&mut self.rng);
        let score_after = (self.score_fn)(&*self.schedule);

        if score_after >= score_before {
            self.schedule.game_mut(game_one).set_seats(old_one);
            self.schedule.game_mut(game_two).set_seats(old_two);
            return false;
        }

        true
    }

    /// Swap the occupants of two random seats of one game
    pub fn switch_two_seats(&mut self, game: usize) -> bool {
        let seat_one = self.rng.gen_range(0..NUM_SEATS);
        let seat_two = (seat_one + 1 + self.rng.gen_range(0..NUM_SEATS - 1)) % NUM_SEATS;

        let score_before = (self.score_fn)(&*self.schedule);
        self.schedule.switch_seats(game, seat_one, seat_two);
        let score_after = (self.score_fn)(&*self.schedule);

        if score_after >= score_before {
            self.schedule.switch_seats(game, seat_two, seat_one);
            return false;
        }

        true
    }

    fn two_distinct_games(&mut self) -> Option<(usize, usize)> {
        let num_games = self.schedule.games().len();
        if num_games < 2 {
            return None;
        }

        let one = self.rng.gen_range(0..num_games);
        let two = (one + 1 + self.rng.gen_range(0..num_games - 1)) % num_games;
        Some((one, two))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, PlayerId};
    use crate::metrics::Metrics;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seat_deviation(schedule: &Schedule) -> f64 {
        let metrics = Metrics::new(schedule);
        let conf = schedule.config();
        (0..conf.num_players())
            .map(|p| {
                let seats = metrics.calc_player_seats_histogram(p as PlayerId);
                Metrics::calc_square_deviation_to(&seats, None, conf.seat_target())
            })
            .sum()
    }

    fn opponents(schedule: &Schedule) -> Vec<Vec<usize>> {
        let metrics = Metrics::new(schedule);
        (0..schedule.config().num_players())
            .map(|p| metrics.calc_player_opponents_histogram(p as PlayerId))
            .collect()
    }

    #[test]
    fn test_optimize_keeps_tables_and_improves_seats() {
        let conf = Configuration::new(20, 10, 2, 20, 10);
        let mut schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        let tables_before = opponents(&schedule);
        let initial = seat_deviation(&schedule);

        let rng = ChaCha8Rng::seed_from_u64(42);
        let mut optimizer = SeatOptimizer::new(&mut schedule, 2, 200, 200, seat_deviation, rng);
        let score = optimizer.optimize();
        let stats = optimizer.stats();

        assert!(score < initial, "score {} should drop below {}", score, initial);
        assert_eq!(stats.shuffle_trials, 800);
        assert_eq!(stats.switch_trials, 400);
        assert!(stats.good_shuffles + stats.good_switches > 0);

        assert_eq!(opponents(&schedule), tables_before);
        assert!(schedule.verify());
    }

    #[test]
    fn test_rejected_shuffle_restores_game() {
        let conf = Configuration::new(20, 4, 2, 8, 4);
        let mut schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        let original = schedule.clone();

        // a constant score never improves, so every move is rolled back
        let rng = ChaCha8Rng::seed_from_u64(42);
        let mut optimizer = SeatOptimizer::new(&mut schedule, 1, 0, 0, |_: &Schedule| 1.0, rng);
        assert!(!optimizer.shuffle_game(3));
        assert!(!optimizer.shuffle_games(1, 6));
        assert!(!optimizer.shuffle_games(2, 2));
        assert!(!optimizer.switch_two_seats(0));
        drop(optimizer);

        assert_eq!(schedule, original);
    }

    #[test]
    fn test_switch_two_seats_accepts_improvement() {
        let conf = Configuration::new(20, 4, 2, 8, 4);
        let mut schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();

        // reward player 0 leaving seat 0 of game 0
        let score_fn = |s: &Schedule| if s.game(0).player_at_seat(0) == 0 { 1.0 } else { 0.0 };
        let rng = ChaCha8Rng::seed_from_u64(42);
        let mut optimizer = SeatOptimizer::new(&mut schedule, 1, 0, 0, score_fn, rng);

        let mut accepted = false;
        for _ in 0..50 {
            accepted |= optimizer.switch_two_seats(0);
        }
        drop(optimizer);

        assert!(accepted);
        assert_ne!(schedule.game(0).player_at_seat(0), 0);
        assert!(schedule.game(0).participates(0));
    }
}

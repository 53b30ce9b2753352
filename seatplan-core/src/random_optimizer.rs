//! Hill climbing over player placement
//!
//! Every trial swaps two players between two games of the same round and
//! keeps the swap only when the score strictly drops. Seats are inherited:
//! each player takes the seat the other one left.

use rand::Rng;

use crate::config::PlayerId;
use crate::schedule::Schedule;

/// How many random seat pairs a trial tries before giving up
pub const MAX_SWAP_ATTEMPTS: usize = 100;

/// First iteration interval between progress messages, grows 5x each time
const PROGRESS_INTERVAL: usize = 30;

/// Player-swap hill climber
///
/// The score function is supplied by the caller; lower is better.
pub struct RandomOptimizer<'a, F, R> {
    schedule: &'a mut Schedule,
    max_iterations: usize,
    score_fn: F,
    rng: R,
    total_iterations: usize,
    good_iterations: usize,
    probes: usize,
}

impl<'a, F, R> RandomOptimizer<'a, F, R>
where
    F: FnMut(&Schedule) -> f64,
    R: Rng,
{
    pub fn new(schedule: &'a mut Schedule, max_iterations: usize, score_fn: F, rng: R) -> Self {
        Self {
            schedule,
            max_iterations,
            score_fn,
            rng,
            total_iterations: 0,
            good_iterations: 0,
            probes: 0,
        }
    }

    /// Run all trials and return the final score
    pub fn optimize(&mut self) -> f64 {
        let mut interval = PROGRESS_INTERVAL;

        for i in 0..self.max_iterations {
            if i % interval == 0 {
                let score = self.score();
                tracing::debug!(
                    "Iteration #{}: score={:.2} good iterations: {}",
                    i,
                    score,
                    self.good_iterations
                );
                interval *= 5;
            }

            let success = self.trial();
            self.good_iterations += success as usize;
            self.total_iterations += 1;
        }

        tracing::debug!(
            "Iterations: {}, probes: {}, good iterations: {}",
            self.total_iterations,
            self.probes,
            self.good_iterations
        );

        self.score()
    }

    /// Trials run so far
    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    /// Trials that improved the score
    pub fn good_iterations(&self) -> usize {
        self.good_iterations
    }

    /// Score evaluations so far
    pub fn probes(&self) -> usize {
        self.probes
    }

    // ========================================================================
    // Trials
    // ========================================================================

    /// One propose / score / accept-or-revert cycle
    fn trial(&mut self) -> bool {
        let config = *self.schedule.config();

        // a single table has no second game in a round: swap across rounds
        if config.num_tables() == 1 {
            return self.trial_across_rounds();
        }

        let round = self.schedule.generate_random_round(&mut self.rng);
        if self.schedule.rounds()[round].num_games() < 2 {
            return false;
        }

        let (game_one, game_two) = self.schedule.generate_random_games(round, &mut self.rng);
        self.trial_in_games(game_one, game_two)
    }

    /// Pick random seats in both games until the occupants can be swapped
    fn trial_in_games(&mut self, game_one: usize, game_two: usize) -> bool {
        for _ in 0..MAX_SWAP_ATTEMPTS {
            let seat_one = self.schedule.generate_random_seat(&mut self.rng);
            let seat_two = self.schedule.generate_random_seat(&mut self.rng);

            let player_one = self.schedule.game(game_one).player_at_seat(seat_one);
            let player_two = self.schedule.game(game_two).player_at_seat(seat_two);

            if self.schedule.can_switch_players(player_one, game_one, player_two, game_two) {
                return self.try_switch(player_one, game_one, player_two, game_two);
            }
        }

        false
    }

    /// Swap between the games of two distinct rounds
    fn trial_across_rounds(&mut self) -> bool {
        let num_rounds = self.schedule.rounds().len();
        if num_rounds < 2 {
            return false;
        }

        let round_one = self.schedule.generate_random_round(&mut self.rng);
        let mut round_two = self.schedule.generate_random_round(&mut self.rng);
        if round_one == round_two {
            round_two = (round_two + 1) % num_rounds;
        }

        let game_one = self.schedule.rounds()[round_one].game_indices().start;
        let game_two = self.schedule.rounds()[round_two].game_indices().start;

        let (pool_one, pool_two) = self.schedule.swap_candidates(game_one, game_two);
        if pool_one.is_empty() || pool_two.is_empty() {
            return false;
        }

        let player_one = pool_one[self.rng.gen_range(0..pool_one.len())];
        let player_two = pool_two[self.rng.gen_range(0..pool_two.len())];
        self.try_switch(player_one, game_one, player_two, game_two)
    }

    /// Apply a legal swap, keep it only if the score strictly drops
    fn try_switch(
        &mut self,
        player_one: PlayerId,
        game_one: usize,
        player_two: PlayerId,
        game_two: usize,
    ) -> bool {
        let score_before = self.score();
        self.schedule.switch_players(player_one, game_one, player_two, game_two);
        let score_after = self.score();

        if score_after >= score_before {
            self.schedule.switch_players(player_two, game_one, player_one, game_two);
            return false;
        }

        true
    }

    fn score(&mut self) -> f64 {
        self.probes += 1;
        (self.score_fn)(&*self.schedule)
    }
}

//! Configuration types for the optimization runs
//!
//! Level 4 - Utilities and configuration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use seatplan_core::PlayerId;

/// Player-placement search settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSolveConfig {
    /// Distance between starting shifts of the round-robin seeding
    /// (0 = start from shift 0 only)
    pub player_step: usize,
    /// Independent optimization runs per starting shift
    pub stages: usize,
    /// Hill-climbing trials per run
    pub iterations: usize,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for PlayerSolveConfig {
    fn default() -> Self {
        Self {
            player_step: 0,
            stages: 3,
            iterations: 100 * 100 * 100,
            seed: None,
        }
    }
}

impl PlayerSolveConfig {
    /// Create config with given stages and iterations per stage
    pub fn new(stages: usize, iterations: usize) -> Self {
        Self {
            stages,
            iterations,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set distance between starting shifts
    pub fn with_player_step(mut self, step: usize) -> Self {
        self.player_step = step;
        self
    }

    /// Starting shifts to seed initial schedules from
    pub fn shifts(&self, num_players: usize) -> Vec<PlayerId> {
        let step = if self.player_step == 0 {
            num_players
        } else {
            self.player_step
        };
        (0..num_players).step_by(step.max(1)).map(|p| p as PlayerId).collect()
    }
}

/// Seat-order search settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSolveConfig {
    /// Independent runs from the same input schedule
    pub attempts: usize,
    /// Stages per run
    pub stages: usize,
    /// Shuffle trials per stage (applied to one game and to two games)
    pub shuffles_per_stage: usize,
    /// Seat switch trials per stage
    pub switches_per_stage: usize,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SeatSolveConfig {
    fn default() -> Self {
        Self {
            attempts: 50,
            stages: 2,
            shuffles_per_stage: 800_000,
            switches_per_stage: 400_000,
            seed: None,
        }
    }
}

impl SeatSolveConfig {
    /// Create config with given run sizes
    pub fn new(attempts: usize, stages: usize, shuffles: usize, switches: usize) -> Self {
        Self {
            attempts,
            stages,
            shuffles_per_stage: shuffles,
            switches_per_stage: switches,
            seed: None,
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// RNG for one run: derived from the seed when given, otherwise from entropy
pub(crate) fn run_rng(seed: Option<u64>, run: u64) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run)),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_player_config_defaults() {
        let config = PlayerSolveConfig::default();
        assert_eq!(config.player_step, 0);
        assert_eq!(config.stages, 3);
        assert_eq!(config.iterations, 1_000_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_shifts() {
        assert_eq!(PlayerSolveConfig::default().shifts(20), vec![0]);
        assert_eq!(
            PlayerSolveConfig::default().with_player_step(7).shifts(20),
            vec![0, 7, 14]
        );
    }

    #[test]
    fn test_seat_config_defaults() {
        let config = SeatSolveConfig::default();
        assert_eq!(config.attempts, 50);
        assert_eq!(config.stages, 2);
        assert_eq!(config.shuffles_per_stage, 800_000);
        assert_eq!(config.switches_per_stage, 400_000);
    }

    #[test]
    fn test_run_rng_is_reproducible() {
        let a: u64 = run_rng(Some(42), 3).gen();
        let b: u64 = run_rng(Some(42), 3).gen();
        let c: u64 = run_rng(Some(42), 4).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

//! Schedule - all games of a tournament, grouped by rounds
//!
//! Owns the games in a flat vector; rounds are index ranges into it.
//! Besides construction and validation it provides the primitives the
//! optimizers build their moves from: random samplers and legal
//! player / seat swaps.

use rand::Rng;

use crate::config::{Configuration, PlayerId, SeatId, NO_TABLE, NUM_SEATS};
use crate::error::ScheduleError;
use crate::game::Game;
use crate::round::Round;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    config: Configuration,
    games: Vec<Game>,
    rounds: Vec<Round>,
}

impl Schedule {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a schedule from ready games
    ///
    /// Fails when the number of games does not match the configuration.
    pub fn new(config: Configuration, games: Vec<Game>) -> Result<Self, ScheduleError> {
        if games.len() != config.num_games() {
            return Err(ScheduleError::GameCount {
                expected: config.num_games(),
                actual: games.len(),
            });
        }

        let rounds = (0..config.num_rounds())
            .map(|round| Round::new(config.round_range(round)))
            .collect();

        Ok(Self { config, games, rounds })
    }

    /// Round-robin seeding: every game takes the next [`NUM_SEATS`] players
    /// in cyclic order, starting with `shift_player`
    ///
    /// Each player ends up in exactly `attempts` games; opponents are poorly
    /// mixed until an optimizer runs.
    pub fn create_initial_schedule(
        config: &Configuration,
        shift_player: PlayerId,
    ) -> Result<Self, ScheduleError> {
        let num_players = config.num_players();
        let mut player = shift_player as usize % num_players;

        let mut games = Vec::with_capacity(config.num_games());
        for idx in 0..config.num_games() {
            let mut seats = [0; NUM_SEATS];
            for seat in seats.iter_mut() {
                *seat = player as PlayerId;
                player = (player + 1) % num_players;
            }
            games.push(Game::new(config, &seats).map_err(|e| e.at_game(idx))?);
        }

        Self::new(*config, games)
    }

    /// Build a schedule from explicit seat lists, one per game
    ///
    /// Balance of the result is the caller's responsibility.
    pub fn create_custom_schedule_from_games(
        config: &Configuration,
        seats: &[Vec<PlayerId>],
    ) -> Result<Self, ScheduleError> {
        if seats.len() != config.num_games() {
            return Err(ScheduleError::GameCount {
                expected: config.num_games(),
                actual: seats.len(),
            });
        }

        let games = seats
            .iter()
            .enumerate()
            .map(|(idx, s)| Game::new(config, s).map_err(|e| e.at_game(idx)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(*config, games)
    }

    /// Build a schedule from per-player table lists
    ///
    /// `players[p][r]` is the table player `p` sits at in round `r`, or
    /// [`NO_TABLE`]. Seats are filled in player order.
    pub fn create_custom_schedule_from_players(
        config: &Configuration,
        players: &[Vec<i32>],
    ) -> Result<Self, ScheduleError> {
        if players.len() != config.num_players() {
            return Err(ScheduleError::PlayerCount {
                expected: config.num_players(),
                actual: players.len(),
            });
        }

        let mut seats: Vec<Vec<PlayerId>> = vec![Vec::with_capacity(NUM_SEATS); config.num_games()];
        for (player, tables) in players.iter().enumerate() {
            if tables.len() != config.num_rounds() {
                return Err(ScheduleError::PlayerTablesLength {
                    player,
                    expected: config.num_rounds(),
                    actual: tables.len(),
                });
            }

            for (round, &table) in tables.iter().enumerate() {
                if table == NO_TABLE {
                    continue;
                }

                let range = config.round_range(round);
                if table < 0 || table as usize >= range.len() {
                    return Err(ScheduleError::TableOutOfRange {
                        player,
                        round,
                        table,
                        tables: range.len(),
                    });
                }
                seats[range.start + table as usize].push(player as PlayerId);
            }
        }

        Self::create_custom_schedule_from_games(config, &seats)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game(&self, idx: usize) -> &Game {
        &self.games[idx]
    }

    /// Mutable access for seat-only edits
    pub fn game_mut(&mut self, idx: usize) -> &mut Game {
        &mut self.games[idx]
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Games of round `round`
    pub fn round_games(&self, round: usize) -> &[Game] {
        &self.games[self.rounds[round].game_indices()]
    }

    /// Number of games each player takes part in
    pub fn games_played(&self) -> Vec<usize> {
        let mut played = vec![0; self.config.num_players()];
        for game in &self.games {
            for player in 0..self.config.num_players() {
                if game.participates(player as PlayerId) {
                    played[player] += 1;
                }
            }
        }
        played
    }

    /// Table index `player` sits at in every round, `None` when sitting out
    pub fn player_tables(&self, player: PlayerId) -> Vec<Option<usize>> {
        (0..self.rounds.len())
            .map(|round| {
                self.round_games(round)
                    .iter()
                    .position(|game| game.participates(player))
            })
            .collect()
    }

    /// Per-player table lists, the input format of
    /// [`Schedule::create_custom_schedule_from_players`]
    pub fn to_player_tables(&self) -> Vec<Vec<i32>> {
        (0..self.config.num_players())
            .map(|player| {
                self.player_tables(player as PlayerId)
                    .into_iter()
                    .map(|table| table.map_or(NO_TABLE, |t| t as i32))
                    .collect()
            })
            .collect()
    }

    /// Check that every player plays exactly `attempts` games
    pub fn verify(&self) -> bool {
        let played = self.games_played();
        let ok = played.iter().all(|&n| n == self.config.num_attempts());

        if !ok {
            tracing::warn!("Schedule verification failed, games played: {:?}", played);
        }

        ok
    }

    // ========================================================================
    // Random helpers for optimizers
    // ========================================================================

    /// Pick a random round that has all its tables
    ///
    /// A trailing partial round falls back to the one before it. When the
    /// partial round is the only one, it is returned as is; callers check
    /// [`Round::num_games`] before sampling games from it.
    pub fn generate_random_round<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let round = rng.gen_range(0..self.config.num_rounds());

        if round > 0 && self.rounds[round].num_games() < self.config.num_tables() {
            return round - 1;
        }

        round
    }

    /// Pick two distinct games of `round`
    pub fn generate_random_games<R: Rng + ?Sized>(&self, round: usize, rng: &mut R) -> (usize, usize) {
        let range = self.rounds[round].game_indices();
        let games_in_round = range.len();
        assert!(games_in_round >= 2, "round {} has fewer than two games", round);

        let shift_one = rng.gen_range(0..games_in_round);
        let add_two = 1 + rng.gen_range(0..games_in_round - 1);
        let shift_two = (shift_one + add_two) % games_in_round;

        (range.start + shift_one, range.start + shift_two)
    }

    pub fn generate_random_game<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.config.num_games())
    }

    pub fn generate_random_seat<R: Rng + ?Sized>(&self, rng: &mut R) -> SeatId {
        rng.gen_range(0..NUM_SEATS) as SeatId
    }

    pub fn generate_random_player<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayerId {
        rng.gen_range(0..self.config.num_players()) as PlayerId
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// A swap is legal when each player sits in their own game and is
    /// absent from the other one
    pub fn can_switch_players(
        &self,
        player_a: PlayerId,
        game_a: usize,
        player_b: PlayerId,
        game_b: usize,
    ) -> bool {
        self.games[game_a].can_substitute_player(player_a, player_b)
            && self.games[game_b].can_substitute_player(player_b, player_a)
    }

    /// Move `player_a` to `game_b` and `player_b` to `game_a`, each taking
    /// the other's seat
    ///
    /// # Panics
    /// Panics if [`Schedule::can_switch_players`] is false.
    pub fn switch_players(
        &mut self,
        player_a: PlayerId,
        game_a: usize,
        player_b: PlayerId,
        game_b: usize,
    ) {
        assert!(
            self.can_switch_players(player_a, game_a, player_b, game_b),
            "can not switch player {} (game {}) with player {} (game {})",
            player_a,
            game_a,
            player_b,
            game_b
        );

        self.games[game_a].substitute_player(player_a, player_b);
        self.games[game_b].substitute_player(player_b, player_a);
    }

    pub fn switch_seats(&mut self, game: usize, seat_one: usize, seat_two: usize) {
        self.games[game].switch_seats(seat_one, seat_two);
    }

    /// Players that can move from `game_a` to `game_b` and back
    ///
    /// Returns (plays in a but not in b, plays in b but not in a).
    pub fn swap_candidates(&self, game_a: usize, game_b: usize) -> (Vec<PlayerId>, Vec<PlayerId>) {
        let a = &self.games[game_a];
        let b = &self.games[game_b];

        let pool_a = (0..self.config.num_players() as PlayerId)
            .filter(|&p| a.participates(p) && !b.participates(p))
            .collect();
        let pool_b = (0..self.config.num_players() as PlayerId)
            .filter(|&p| b.participates(p) && !a.participates(p))
            .collect();

        (pool_a, pool_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{INVALID_PLAYER_ID, INVALID_SEAT_ID};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_table() -> Configuration {
        Configuration::new(10, 3, 1, 3, 3)
    }

    fn two_tables() -> Configuration {
        Configuration::new(20, 4, 2, 8, 4)
    }

    #[test]
    fn test_initial_schedule_is_balanced() {
        for conf in [single_table(), two_tables(), Configuration::new(25, 5, 3, 15, 6)] {
            for shift in [0, 3, 11] {
                let schedule = Schedule::create_initial_schedule(&conf, shift).unwrap();
                assert!(schedule.verify());
                assert!(schedule
                    .games_played()
                    .iter()
                    .all(|&n| n == conf.num_attempts()));
            }
        }
    }

    #[test]
    fn test_initial_schedule_round_robin_order() {
        let schedule = Schedule::create_initial_schedule(&two_tables(), 5).unwrap();
        let first: Vec<PlayerId> = (5..15).collect();
        assert_eq!(schedule.game(0).seats().as_slice(), first.as_slice());

        let second: Vec<PlayerId> = (15..20).chain(0..5).collect();
        assert_eq!(schedule.game(1).seats().as_slice(), second.as_slice());
    }

    #[test]
    fn test_rounds_group_tables() {
        let schedule = Schedule::create_initial_schedule(&two_tables(), 0).unwrap();
        assert_eq!(schedule.rounds().len(), 4);
        for round in 0..4 {
            assert_eq!(schedule.round_games(round).len(), 2);
        }
        assert!(schedule.rounds()[1].contains(2));
        assert!(schedule.rounds()[1].contains(3));
    }

    #[test]
    fn test_partial_last_round() {
        // 30 players, 3 tables, 3 rounds of which the last has 2 tables
        let conf = Configuration::new(30, 3, 3, 8, 0);
        let seats: Vec<Vec<PlayerId>> = (0..8)
            .map(|g| (0..10).map(|s| ((g * 10 + s) % 30) as PlayerId).collect())
            .collect();
        let schedule = Schedule::create_custom_schedule_from_games(&conf, &seats).unwrap();

        assert_eq!(schedule.round_games(2).len(), 2);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let round = schedule.generate_random_round(&mut rng);
            assert!(round < 2);
        }
    }

    #[test]
    fn test_only_round_partial_is_returned() {
        let conf = Configuration::from_params(20, 1, 3, 2).unwrap();
        let schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(schedule.generate_random_round(&mut rng), 0);
        }
        assert_eq!(schedule.rounds()[0].num_games(), 2);
    }

    #[test]
    fn test_game_count_mismatch() {
        let conf = two_tables();
        let seats: Vec<Vec<PlayerId>> = vec![(0..10).collect(); 3];
        let err = Schedule::create_custom_schedule_from_games(&conf, &seats).unwrap_err();
        assert_eq!(err, ScheduleError::GameCount { expected: 8, actual: 3 });
    }

    #[test]
    fn test_custom_schedule_reports_game_index() {
        let conf = single_table();
        let seats = vec![(0..10).collect(), (0..10).collect(), (0..9).collect()];
        let err = Schedule::create_custom_schedule_from_games(&conf, &seats).unwrap_err();
        assert_eq!(err, ScheduleError::SeatCount { game: 2, expected: 10, actual: 9 });
    }

    #[test]
    fn test_player_tables_round_trip() {
        let conf = two_tables();
        let schedule = Schedule::create_initial_schedule(&conf, 7).unwrap();

        let tables = schedule.to_player_tables();
        assert_eq!(tables.len(), 20);
        assert!(tables.iter().all(|t| t.len() == 4));

        let rebuilt = Schedule::create_custom_schedule_from_players(&conf, &tables).unwrap();
        for (a, b) in schedule.games().iter().zip(rebuilt.games()) {
            for p in 0..20 {
                assert_eq!(a.participates(p), b.participates(p));
            }
        }
        assert!(rebuilt.verify());
    }

    #[test]
    fn test_custom_from_players_sits_out() {
        // 15 players, 1 table: every player sits out one of three rounds
        let conf = Configuration::new(15, 3, 1, 3, 2);
        let players: Vec<Vec<i32>> = (0..15)
            .map(|p| match p {
                0..=4 => vec![0, 0, NO_TABLE],
                5..=9 => vec![0, NO_TABLE, 0],
                _ => vec![NO_TABLE, 0, 0],
            })
            .collect();

        let schedule = Schedule::create_custom_schedule_from_players(&conf, &players).unwrap();
        assert!(schedule.verify());
        assert_eq!(schedule.player_tables(12), vec![None, Some(0), Some(0)]);
    }

    #[test]
    fn test_custom_from_players_rejects_bad_table() {
        let conf = two_tables();
        let mut tables = Schedule::create_initial_schedule(&conf, 0).unwrap().to_player_tables();
        tables[3][1] = 2;
        let err = Schedule::create_custom_schedule_from_players(&conf, &tables).unwrap_err();
        assert_eq!(err, ScheduleError::TableOutOfRange { player: 3, round: 1, table: 2, tables: 2 });

        tables[3].pop();
        assert!(matches!(
            Schedule::create_custom_schedule_from_players(&conf, &tables),
            Err(ScheduleError::PlayerTablesLength { player: 3, .. })
        ));
    }

    #[test]
    fn test_verify_detects_imbalance() {
        let conf = two_tables();
        let mut schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        // player 15 takes player 0's seat without giving one back
        let seat = schedule.game(0).seat_of(0).unwrap();
        schedule.game_mut(0).put_player_to_seat(seat, 15);
        assert!(!schedule.verify());
    }

    #[test]
    fn test_verify_requires_attempts_games() {
        // every player plays 3 games, but the tournament asks for 4
        let conf = two_tables();
        let mut seats: Vec<Vec<PlayerId>> = Schedule::create_initial_schedule(&conf, 0)
            .unwrap()
            .games()
            .iter()
            .take(6)
            .map(|g| g.seats().to_vec())
            .collect();
        seats.extend(vec![vec![INVALID_PLAYER_ID; NUM_SEATS]; 2]);

        let schedule = Schedule::create_custom_schedule_from_games(&conf, &seats).unwrap();
        assert_eq!(schedule.games_played(), vec![3; 20]);
        assert!(!schedule.verify());
    }

    #[test]
    fn test_random_games_are_distinct() {
        let schedule = Schedule::create_initial_schedule(&Configuration::new(30, 2, 3, 6, 2), 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let round = schedule.generate_random_round(&mut rng);
            let (g1, g2) = schedule.generate_random_games(round, &mut rng);
            assert_ne!(g1, g2);
            assert!(schedule.rounds()[round].contains(g1));
            assert!(schedule.rounds()[round].contains(g2));
        }
    }

    #[test]
    fn test_random_samplers_in_range() {
        let schedule = Schedule::create_initial_schedule(&two_tables(), 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            assert!((schedule.generate_random_seat(&mut rng) as usize) < NUM_SEATS);
            assert!(schedule.generate_random_game(&mut rng) < 8);
            assert!(schedule.generate_random_player(&mut rng) < 20);
        }
    }

    #[test]
    fn test_switch_players_and_back() {
        let conf = two_tables();
        let mut schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        let original = schedule.clone();

        // game 0 seats 0..10, game 1 seats 10..20
        assert!(schedule.can_switch_players(3, 0, 14, 1));
        assert!(!schedule.can_switch_players(3, 0, 4, 1));

        schedule.switch_players(3, 0, 14, 1);
        assert!(schedule.game(0).participates(14));
        assert!(!schedule.game(0).participates(3));
        assert!(schedule.game(1).participates(3));
        assert!(!schedule.game(1).participates(14));
        assert!(schedule.verify());

        schedule.switch_players(14, 0, 3, 1);
        assert_eq!(schedule, original);
    }

    #[test]
    #[should_panic(expected = "can not switch")]
    fn test_switch_players_checks_precondition() {
        let mut schedule = Schedule::create_initial_schedule(&two_tables(), 0).unwrap();
        schedule.switch_players(3, 0, 4, 0);
    }

    #[test]
    fn test_switch_seats_twice_restores_layout() {
        let mut schedule = Schedule::create_initial_schedule(&two_tables(), 0).unwrap();
        let original = schedule.clone();
        schedule.switch_seats(5, 2, 9);
        assert_ne!(schedule, original);
        schedule.switch_seats(5, 2, 9);
        assert_eq!(schedule, original);
    }

    #[test]
    fn test_swap_candidates_single_table() {
        let conf = Configuration::new(15, 3, 1, 3, 2);
        let schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        // game 0: 0..10, game 1: 10..15 + 0..5
        let (pool_a, pool_b) = schedule.swap_candidates(0, 1);
        assert_eq!(pool_a, (5..10).collect::<Vec<PlayerId>>());
        assert_eq!(pool_b, (10..15).collect::<Vec<PlayerId>>());
    }

    #[test]
    fn test_clone_is_independent() {
        let schedule = Schedule::create_initial_schedule(&two_tables(), 0).unwrap();
        let mut copy = schedule.clone();
        assert_eq!(copy.verify(), schedule.verify());

        copy.switch_players(3, 0, 14, 1);
        assert!(schedule.game(0).participates(3));
        assert!(copy.round_games(0)[1].participates(3));
        assert_eq!(copy.game(0).players()[3], INVALID_SEAT_ID);
    }
}

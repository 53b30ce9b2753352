//! A single table: who plays and on which seat

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{Configuration, PlayerId, SeatId, INVALID_PLAYER_ID, INVALID_SEAT_ID, NUM_SEATS};
use crate::error::ScheduleError;

/// Seat index -> player id
pub type Seats = [PlayerId; NUM_SEATS];

/// One table instance in one round
///
/// Keeps the seat -> player array together with its inverse
/// (player -> seat, [`INVALID_SEAT_ID`] when the player is not at this table).
/// Bulk edits recompute the inverse; single edits patch it in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    seats: Seats,
    players: Vec<SeatId>,
}

impl Game {
    /// Build a game from a seat list of exactly [`NUM_SEATS`] entries
    ///
    /// Seats may hold [`INVALID_PLAYER_ID`] when they are not filled yet.
    pub fn new(config: &Configuration, seats: &[PlayerId]) -> Result<Self, ScheduleError> {
        let seats: Seats = seats.try_into().map_err(|_| ScheduleError::SeatCount {
            game: 0,
            expected: NUM_SEATS,
            actual: seats.len(),
        })?;

        let mut seen = vec![false; config.num_players()];
        for &player in seats.iter().filter(|&&p| p != INVALID_PLAYER_ID) {
            let idx = player as usize;
            if idx >= config.num_players() {
                return Err(ScheduleError::PlayerOutOfRange {
                    game: 0,
                    player: idx,
                    players: config.num_players(),
                });
            }
            if seen[idx] {
                return Err(ScheduleError::DuplicatePlayer { game: 0, player: idx });
            }
            seen[idx] = true;
        }

        let mut game = Self {
            seats,
            players: vec![INVALID_SEAT_ID; config.num_players()],
        };
        game.calc_players();
        Ok(game)
    }

    /// Seat -> player map
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    /// Player -> seat map, [`INVALID_SEAT_ID`] for players not at this table
    pub fn players(&self) -> &[SeatId] {
        &self.players
    }

    /// Seat of `player`, if they play in this game
    ///
    /// Ids outside the tournament, [`INVALID_PLAYER_ID`] included, are
    /// never seated.
    pub fn seat_of(&self, player: PlayerId) -> Option<SeatId> {
        match self.players.get(player as usize) {
            Some(&seat) if seat != INVALID_SEAT_ID => Some(seat),
            _ => None,
        }
    }

    pub fn participates(&self, player: PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    pub fn player_at_seat(&self, seat: SeatId) -> PlayerId {
        self.seats[seat as usize]
    }

    /// Put `player` on `seat`, evicting whoever sat there
    ///
    /// Low-level primitive: the caller makes sure `player` is not seated
    /// elsewhere in this game.
    pub fn put_player_to_seat(&mut self, seat: SeatId, player: PlayerId) {
        assert!((player as usize) < self.players.len(), "player {} out of range", player);

        let old = self.seats[seat as usize];
        self.seats[seat as usize] = player;

        if old != INVALID_PLAYER_ID {
            self.players[old as usize] = INVALID_SEAT_ID;
        }
        self.players[player as usize] = seat;
    }

    /// True iff `a` plays here and `b` is a player who does not
    pub fn can_substitute_player(&self, a: PlayerId, b: PlayerId) -> bool {
        (b as usize) < self.players.len() && self.participates(a) && !self.participates(b)
    }

    /// Give `a`'s seat to `b`
    ///
    /// # Panics
    /// Panics if [`Game::can_substitute_player`] is false for `(a, b)`.
    pub fn substitute_player(&mut self, a: PlayerId, b: PlayerId) {
        assert!(
            self.can_substitute_player(a, b),
            "can not substitute player {} with player {}",
            a,
            b
        );

        let seat = self.players[a as usize];
        debug_assert_eq!(self.seats[seat as usize], a);

        self.seats[seat as usize] = b;
        self.players[a as usize] = INVALID_SEAT_ID;
        self.players[b as usize] = seat;
    }

    /// Swap the occupants of two seats
    pub fn switch_seats(&mut self, seat_one: usize, seat_two: usize) {
        let player_one = self.seats[seat_one];
        let player_two = self.seats[seat_two];

        self.seats.swap(seat_one, seat_two);

        if player_one != INVALID_PLAYER_ID {
            self.players[player_one as usize] = seat_two as SeatId;
        }
        if player_two != INVALID_PLAYER_ID {
            self.players[player_two as usize] = seat_one as SeatId;
        }
    }

    /// Replace the whole seat layout
    pub fn set_seats(&mut self, seats: Seats) {
        self.seats = seats;
        self.calc_players();
    }

    /// Randomly permute all seats
    pub fn shuffle_seats<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.seats.shuffle(rng);
        self.calc_players();
    }

    fn calc_players(&mut self) {
        self.players.fill(INVALID_SEAT_ID);
        for (idx, &player) in self.seats.iter().enumerate() {
            if player != INVALID_PLAYER_ID {
                self.players[player as usize] = idx as SeatId;
            }
        }
    }
}

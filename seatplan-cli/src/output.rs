//! Console rendering of configurations and schedules
//!
//! Players, seats and games are shown 1-based; tables within a round are
//! lettered A, B, C...

use seatplan_core::{Configuration, Game, Metrics, PlayerId, Schedule};

// ============================================================================
// Composite outputs
// ============================================================================

/// Pair statistics and the per-player table list, printed after every
/// improvement of the player search
pub fn render_short_player_optimization(schedule: &Schedule) -> String {
    let mut out = render_pairs_histogram(schedule);
    out.push_str(&render_player_tables(schedule));
    out
}

/// Everything known about a finished schedule
pub fn render_final(schedule: &Schedule) -> String {
    let mut out = String::new();
    out.push_str(&render_pairs_histogram(schedule));
    out.push_str(&render_opponent_matrix(schedule));
    out.push_str(&render_player_statistics(schedule));
    out.push_str(&render_by_rounds(schedule));
    out.push_str(&render_by_players(schedule));
    out.push_str(&render_player_tables(schedule));
    out.push_str(&render_seat_histograms(schedule));
    out
}

// ============================================================================
// Blocks
// ============================================================================

pub fn render_configuration(conf: &Configuration) -> String {
    let lines = [
        format!("Players: {}", conf.num_players()),
        format!("Rounds: {}", conf.num_rounds()),
        format!("Tables per round: {}", conf.num_tables()),
        format!("Total number of games: {}", conf.num_games()),
        format!(
            "Number of attempts (games played by each player during tournament): {}",
            conf.num_attempts()
        ),
    ];
    block("\n*** Configuration", lines)
}

pub fn render_by_games(schedule: &Schedule) -> String {
    let lines = schedule
        .games()
        .iter()
        .enumerate()
        .map(|(idx, game)| format!("Game {:3} >> {}", idx + 1, render_game(game)));
    block("\n*** Schedule by games", lines)
}

pub fn render_by_rounds(schedule: &Schedule) -> String {
    let mut lines = Vec::new();
    for (round_idx, round) in schedule.rounds().iter().enumerate() {
        lines.push(format!("* Round {:2}", round_idx + 1));
        for idx in round.game_indices() {
            lines.push(format!("Game {:3} >> {}", idx + 1, render_game(schedule.game(idx))));
        }
        lines.push(String::new());
    }
    block("\n*** Schedule by rounds", lines)
}

/// Table letter and seat of every player in every round
pub fn render_by_players(schedule: &Schedule) -> String {
    let lines = (0..schedule.config().num_players()).map(|player| {
        let player = player as PlayerId;
        let cells: String = (0..schedule.rounds().len())
            .map(|round| {
                let games = schedule.round_games(round);
                match games.iter().position(|g| g.participates(player)) {
                    Some(table) => {
                        let seat = games[table].seat_of(player).map_or(0, |s| s as usize + 1);
                        let label = (b'A' + table as u8) as char;
                        format!("{}:{:<2} ", label, seat)
                    }
                    None => " */*  ".to_string(),
                }
            })
            .collect();
        format!("* Player {:3}: {}", player + 1, cells)
    });
    block("\n*** Schedule for players", lines)
}

/// Per-player table lists in brace form, -1 for rounds without a game
pub fn render_player_tables(schedule: &Schedule) -> String {
    let lines = schedule.to_player_tables().into_iter().enumerate().map(|(player, tables)| {
        let cells: Vec<String> = tables.iter().map(|t| format!(" {:2}", t)).collect();
        format!("Player {:2}: {{{}}}", player + 1, cells.join(","))
    });
    block("\n*** Schedule for players in C-style", lines)
}

pub fn render_pairs_histogram(schedule: &Schedule) -> String {
    let counts = Metrics::new(schedule).pairs_histogram();

    let mut lines: Vec<String> = counts
        .iter()
        .enumerate()
        .map(|(together, count)| format!("{:2}: {}", together, count))
        .collect();
    lines.push(format!("Total number of pairs: {}", counts.iter().sum::<usize>()));
    block("\nPairs histogram:", lines)
}

pub fn render_opponent_matrix(schedule: &Schedule) -> String {
    let metrics = Metrics::new(schedule);

    let lines = (0..schedule.config().num_players()).map(|player| {
        let opponents = metrics.calc_player_opponents_histogram(player as PlayerId);
        let cells: String = opponents
            .iter()
            .enumerate()
            .map(|(other, count)| {
                if other == player {
                    "  *".to_string()
                } else {
                    format!("{:3}", count)
                }
            })
            .collect();
        format!("Player {:2}: {}", player + 1, cells)
    });
    block("\nPlayer opponents:", lines)
}

pub fn render_player_statistics(schedule: &Schedule) -> String {
    let metrics = Metrics::new(schedule);
    let conf = schedule.config();

    let mut lines = vec![
        format!("Each player should play {:2.6} times with one another", conf.opponent_target()),
        "            min  max      sd".to_string(),
    ];
    for player in 0..conf.num_players() {
        let opponents = metrics.calc_player_opponents_histogram(player as PlayerId);
        lines.push(format!(
            "Player {:2}: {:3} {:3}        {:2.6}",
            player + 1,
            Metrics::calc_min(&opponents, Some(player)),
            Metrics::calc_max(&opponents, Some(player)),
            Metrics::calc_square_deviation(&opponents, Some(player))
        ));
    }
    block("\nPlayer statistics:", lines)
}

pub fn render_seat_histograms(schedule: &Schedule) -> String {
    let metrics = Metrics::new(schedule);

    let lines = (0..schedule.config().num_players()).map(|player| {
        let cells: String = metrics
            .calc_player_seats_histogram(player as PlayerId)
            .iter()
            .map(|count| format!("{:4}", count))
            .collect();
        format!("Player {:2}: {}", player + 1, cells)
    });
    block("\nPlayer seats:", lines)
}

/// Header line followed by one line per entry
fn block<I>(header: &str, lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::from(header);
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn render_game(game: &Game) -> String {
    game.seats().iter().map(|&p| format!("{:3}", p as usize + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Schedule {
        let conf = Configuration::new(15, 3, 1, 3, 2);
        Schedule::create_initial_schedule(&conf, 0).unwrap()
    }

    #[test]
    fn test_render_configuration() {
        let out = render_configuration(&Configuration::new(20, 4, 2, 8, 4));
        assert!(out.contains("Players: 20"));
        assert!(out.contains("Tables per round: 2"));
        assert!(out.contains("tournament): 4"));
    }

    #[test]
    fn test_render_game_is_one_based() {
        let s = schedule();
        let out = render_by_games(&s);
        assert!(out.contains("Game   1 >>   1  2  3  4  5  6  7  8  9 10"));
    }

    #[test]
    fn test_render_by_players_marks_missing_rounds() {
        let out = render_by_players(&schedule());
        // player 15 sits out round 1 and takes seat 5 of table A in round 2
        let line = out.lines().find(|l| l.starts_with("* Player  15")).unwrap();
        assert!(line.contains(" */*  A:5 "));
    }

    #[test]
    fn test_render_player_tables() {
        let out = render_player_tables(&schedule());
        assert!(out.contains("Player  1: {  0,  0, -1}"));
    }

    #[test]
    fn test_render_pairs_histogram_totals() {
        let out = render_pairs_histogram(&schedule());
        assert!(out.contains("Total number of pairs: 105"));
    }

    #[test]
    fn test_render_by_rounds_layout() {
        let out = render_by_rounds(&schedule());
        let expected = "\n*** Schedule by rounds\n* Round  1\nGame   1 >>   1  2  3  4  5  6  7  8  9 10\n\n";
        assert!(out.starts_with(expected), "unexpected layout:\n{}", out);
        assert_eq!(out.lines().filter(|l| l.is_empty()).count(), 4);
    }

    #[test]
    fn test_render_final_has_all_sections() {
        let out = render_final(&schedule());
        for header in [
            "Pairs histogram",
            "Player opponents",
            "Player statistics",
            "Schedule by rounds",
            "Schedule for players",
            "C-style",
            "Player seats",
        ] {
            assert!(out.contains(header), "missing {}", header);
        }
    }
}

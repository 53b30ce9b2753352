//! Custom player schedule files
//!
//! One line per player, one whitespace separated table index per round
//! (0-based, `-1` = the player sits the round out). Lines starting with `#`
//! and blank lines are skipped.

use std::path::Path;

use anyhow::{Context, Result};

use seatplan_core::{Configuration, Schedule};

use crate::export::ScheduleExport;

/// Parse per-player table lists from file content
pub fn parse_player_schedule(config: &Configuration, content: &str) -> Result<Vec<Vec<i32>>> {
    let mut players = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tables = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i32>()
                    .with_context(|| format!("Line {}: invalid table '{}'", line_no + 1, token))
            })
            .collect::<Result<Vec<_>>>()?;

        if tables.len() != config.num_rounds() {
            anyhow::bail!(
                "Line {}: expected {} rounds, got {}",
                line_no + 1,
                config.num_rounds(),
                tables.len()
            );
        }

        players.push(tables);
    }

    Ok(players)
}

/// Load a player schedule file and build the schedule from it
pub fn load_player_schedule(config: &Configuration, path: &Path) -> Result<Schedule> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let players = parse_player_schedule(config, &content)?;
    tracing::info!("Loaded {} players from {}", players.len(), path.display());

    Schedule::create_custom_schedule_from_players(config, &players)
        .with_context(|| format!("Invalid schedule in {}", path.display()))
}

/// Load either a JSON export (`.json`) or a player schedule text file
///
/// A JSON export carries its own configuration, which has to match the
/// requested one.
pub fn load_schedule(config: &Configuration, path: &Path) -> Result<Schedule> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return load_player_schedule(config, path);
    }

    let export = ScheduleExport::load(path)?;
    if export.config != *config {
        anyhow::bail!(
            "{} was built for {} players, {} rounds, {} tables, {} games",
            path.display(),
            export.config.num_players(),
            export.config.num_rounds(),
            export.config.num_tables(),
            export.config.num_games()
        );
    }
    export.to_schedule()
}

/// Render a schedule in the file format read by [`parse_player_schedule`]
pub fn format_player_schedule(schedule: &Schedule) -> String {
    let mut out = String::from("# one line per player, table per round (-1 = no game)\n");
    for tables in schedule.to_player_tables() {
        let line: Vec<String> = tables.iter().map(|t| t.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

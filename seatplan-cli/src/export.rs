//! JSON export of finished schedules

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use seatplan_core::{Configuration, PlayerId, Schedule};

/// Serializable snapshot of a schedule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleExport {
    pub config: Configuration,
    /// Score of the last optimization, if any ran
    #[serde(default)]
    pub score: Option<f64>,
    /// Seat lists, one per game, 0-based player ids
    pub games: Vec<Vec<PlayerId>>,
    /// Table per round for every player, -1 = no game
    #[serde(default)]
    pub player_tables: Vec<Vec<i32>>,
}

impl ScheduleExport {
    pub fn from_schedule(schedule: &Schedule, score: Option<f64>) -> Self {
        Self {
            config: *schedule.config(),
            score,
            games: schedule.games().iter().map(|g| g.seats().to_vec()).collect(),
            player_tables: schedule.to_player_tables(),
        }
    }

    /// Rebuild the schedule from the stored seat lists
    pub fn to_schedule(&self) -> Result<Schedule> {
        Schedule::create_custom_schedule_from_games(&self.config, &self.games)
            .context("Exported games do not form a valid schedule")
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let export = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(export)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_through_json() {
        let conf = Configuration::new(20, 4, 2, 8, 4);
        let schedule = Schedule::create_initial_schedule(&conf, 3).unwrap();
        let export = ScheduleExport::from_schedule(&schedule, Some(12.5));

        let json = serde_json::to_string(&export).unwrap();
        let parsed: ScheduleExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, export);
        assert_eq!(parsed.to_schedule().unwrap(), schedule);
    }

    #[test]
    fn test_export_rejects_broken_games() {
        let conf = Configuration::new(20, 4, 2, 8, 4);
        let schedule = Schedule::create_initial_schedule(&conf, 0).unwrap();
        let mut export = ScheduleExport::from_schedule(&schedule, None);
        export.games.pop();
        assert!(export.to_schedule().is_err());
    }
}

//! Pre-match data shapes: the creation payload and the setup-wizard output.
//!
//! `NewMatch` is what the scheduling form submits; `MatchSetup` is what the
//! operator gathers across the setup wizard before a match goes live.
//! Once the match is live both are merged into the record and read-only.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};

use super::record::{GameType, OfficialRole, RosterPlayer};

/// Payload for creating a match. Kickoff arrives as separate date and time
/// form fields and is composed into a single instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub competition: String,
    pub game_type: GameType,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"
    pub start_time: String,
}

impl NewMatch {
    /// Validate required fields and compose the kickoff instant (UTC).
    pub fn kickoff(&self) -> Result<DateTime<Utc>> {
        for (field, value) in [
            ("competition", &self.competition),
            ("homeTeam", &self.home_team),
            ("awayTeam", &self.away_team),
            ("venue", &self.venue),
            ("date", &self.date),
            ("startTime", &self.start_time),
        ] {
            if value.trim().is_empty() {
                return Err(OpsError::Validation(format!("missing required field: {}", field)));
            }
        }

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| OpsError::Validation(format!("invalid date '{}': {}", self.date, e)))?;
        let time = NaiveTime::parse_from_str(&self.start_time, "%H:%M").map_err(|e| {
            OpsError::Validation(format!("invalid start time '{}': {}", self.start_time, e))
        })?;

        Ok(Utc.from_utc_datetime(&date.and_time(time)))
    }
}

/// Sport-specific settings collected during team setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Regulation period length in minutes (45 football, 10/12 basketball...)
    pub period_minutes: u8,
    pub period_count: u8,
    #[serde(default)]
    pub extra_time_allowed: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        // Football defaults; the wizard overrides per game type
        Self { period_minutes: 45, period_count: 2, extra_time_allowed: false }
    }
}

impl GameSettings {
    pub fn for_game_type(game_type: GameType) -> Self {
        match game_type {
            GameType::Football => Self { period_minutes: 45, period_count: 2, extra_time_allowed: false },
            GameType::Basketball => Self { period_minutes: 10, period_count: 4, extra_time_allowed: true },
            GameType::Volleyball => Self { period_minutes: 0, period_count: 5, extra_time_allowed: false },
        }
    }
}

/// Everything the setup wizard hands to `start_live_match`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub home_roster: Vec<RosterPlayer>,
    pub away_roster: Vec<RosterPlayer>,
    pub officials: BTreeMap<OfficialRole, String>,
    #[serde(default)]
    pub settings: Option<GameSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_match() -> NewMatch {
        NewMatch {
            competition: "Test Cup".to_string(),
            game_type: GameType::Football,
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            venue: "Stadium X".to_string(),
            date: "2024-05-01".to_string(),
            start_time: "15:00".to_string(),
        }
    }

    #[test]
    fn test_kickoff_composition() {
        let kickoff = new_match().kickoff().unwrap();
        assert_eq!(kickoff.to_rfc3339(), "2024-05-01T15:00:00+00:00");
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut m = new_match();
        m.venue = "  ".to_string();
        let err = m.kickoff().unwrap_err();
        assert!(matches!(err, OpsError::Validation(_)));
        assert!(err.to_string().contains("venue"));
    }

    #[test]
    fn test_bad_time_rejected() {
        let mut m = new_match();
        m.start_time = "25:99".to_string();
        assert!(matches!(m.kickoff(), Err(OpsError::Validation(_))));
    }

    #[test]
    fn test_settings_per_game_type() {
        assert_eq!(GameSettings::for_game_type(GameType::Basketball).period_count, 4);
        assert_eq!(GameSettings::for_game_type(GameType::Volleyball).period_count, 5);
    }
}

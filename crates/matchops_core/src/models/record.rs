//! Match Record - the persisted shape of a managed match.
//!
//! A record is created `Upcoming`, goes `Live` once an operator completes
//! the setup wizard, and ends `Completed`. Everything the scoreboard shows
//! (scores, event log, officials) lives on this one struct.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::MatchEvent;
use super::setup::GameSettings;

/// Store-assigned match identifier. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Sport discipline of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Football,
    Basketball,
    Volleyball,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            GameType::Football => "football",
            GameType::Basketball => "basketball",
            GameType::Volleyball => "volleyball",
        };
        write!(f, "{}", s)
    }
}

/// Home or away side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

/// Match lifecycle status.
///
/// Transitions are strictly forward: `Upcoming → Live → Completed`.
/// `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Completed,
}

impl MatchStatus {
    /// Transition table. No state is skipped and nothing moves backward.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::Upcoming, MatchStatus::Live)
                | (MatchStatus::Live, MatchStatus::Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Completed)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MatchStatus::Upcoming => "UPCOMING",
            MatchStatus::Live => "LIVE",
            MatchStatus::Completed => "COMPLETED",
        };
        write!(f, "{}", s)
    }
}

/// One entry in a team's selected roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: String,
    pub number: u8,
    pub name: String,
    pub position: String,
}

/// One side of the scoreboard: name, running score and selected roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    /// Non-negative by construction; defaults to 0 at creation.
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub roster: Vec<RosterPlayer>,
}

impl TeamSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), score: 0, roster: Vec::new() }
    }
}

/// Named officiating roles assignable at setup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficialRole {
    Referee,
    AssistantReferee1,
    AssistantReferee2,
    FourthOfficial,
}

/// The persisted match entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub competition: String,
    pub game_type: GameType,
    pub venue: String,
    /// Scheduled instant until the match goes live, then the actual start.
    pub kickoff: DateTime<Utc>,
    pub home: TeamSheet,
    pub away: TeamSheet,
    pub status: MatchStatus,
    /// Append-only. Insertion order is authoritative; event timestamps are
    /// informational and never used to reorder.
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub officials: BTreeMap<OfficialRole, String>,
    /// Sport-specific settings chosen during setup; `None` until the match
    /// goes live.
    #[serde(default)]
    pub settings: Option<GameSettings>,
}

impl MatchRecord {
    pub fn team(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamSheet {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Short "Home 2 - 1 Away" line for logs and the console.
    pub fn scoreline(&self) -> String {
        format!("{} {} - {} {}", self.home.name, self.home.score, self.away.score, self.away.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transition_table() {
        assert!(MatchStatus::Upcoming.can_transition_to(MatchStatus::Live));
        assert!(MatchStatus::Live.can_transition_to(MatchStatus::Completed));

        // No skipping, no backward moves
        assert!(!MatchStatus::Upcoming.can_transition_to(MatchStatus::Completed));
        assert!(!MatchStatus::Live.can_transition_to(MatchStatus::Upcoming));
        assert!(!MatchStatus::Completed.can_transition_to(MatchStatus::Live));
        assert!(!MatchStatus::Completed.can_transition_to(MatchStatus::Upcoming));
        assert!(MatchStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let s = serde_json::to_string(&MatchStatus::Upcoming).unwrap();
        assert_eq!(s, "\"UPCOMING\"");
        let s = serde_json::to_string(&MatchStatus::Live).unwrap();
        assert_eq!(s, "\"LIVE\"");
    }

    #[test]
    fn test_team_sheet_defaults() {
        let sheet = TeamSheet::new("Al Ahly");
        assert_eq!(sheet.score, 0);
        assert!(sheet.roster.is_empty());
    }
}

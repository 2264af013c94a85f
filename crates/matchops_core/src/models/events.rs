//! Scoreboard event log entries.
//!
//! Events are a tagged variant with a fixed field set per kind, so adding a
//! kind forces every consumer through an exhaustive match. The log on a
//! `MatchRecord` is append-only; insertion order is the order of record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::TeamSide;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchEvent {
    Goal {
        side: TeamSide,
        player: String,
        minute: u8,
        recorded_at: DateTime<Utc>,
    },
    YellowCard {
        side: TeamSide,
        player: String,
        minute: u8,
        recorded_at: DateTime<Utc>,
    },
    RedCard {
        side: TeamSide,
        player: String,
        minute: u8,
        recorded_at: DateTime<Utc>,
    },
    Substitution {
        side: TeamSide,
        player_off: String,
        player_on: String,
        minute: u8,
        recorded_at: DateTime<Utc>,
    },
    /// End of a period (half, quarter, set). `period` is 1-based.
    PeriodEnd {
        period: u8,
        minute: u8,
        recorded_at: DateTime<Utc>,
    },
}

impl MatchEvent {
    pub fn goal(side: TeamSide, player: impl Into<String>, minute: u8) -> Self {
        MatchEvent::Goal { side, player: player.into(), minute, recorded_at: Utc::now() }
    }

    pub fn minute(&self) -> u8 {
        match self {
            MatchEvent::Goal { minute, .. }
            | MatchEvent::YellowCard { minute, .. }
            | MatchEvent::RedCard { minute, .. }
            | MatchEvent::Substitution { minute, .. }
            | MatchEvent::PeriodEnd { minute, .. } => *minute,
        }
    }

    /// Side the event is attributed to, if any. `PeriodEnd` belongs to the
    /// match, not a team.
    pub fn side(&self) -> Option<TeamSide> {
        match self {
            MatchEvent::Goal { side, .. }
            | MatchEvent::YellowCard { side, .. }
            | MatchEvent::RedCard { side, .. }
            | MatchEvent::Substitution { side, .. } => Some(*side),
            MatchEvent::PeriodEnd { .. } => None,
        }
    }
}

pub mod events;
pub mod record;
pub mod setup;

pub use events::MatchEvent;
pub use record::{
    GameType, MatchId, MatchRecord, MatchStatus, OfficialRole, RosterPlayer, TeamSheet, TeamSide,
};
pub use setup::{GameSettings, MatchSetup, NewMatch};

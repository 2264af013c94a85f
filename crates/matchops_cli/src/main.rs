//! Match Operator Console
//!
//! Thin CLI over `matchops_core` against a JSON file store. The operator
//! lock lives for the duration of one invocation; `setup` therefore runs
//! the whole flow (availability check → wizard → go live) in one process.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use matchops_core::{
    FileStore, GameSettings, GameType, LifecycleManager, MatchEvent, MatchId, MatchRecord,
    MatchStatus, NewMatch, OfficialsDraft, OperatorSession, ScoreUpdate, SetupHandle,
    TeamSetupDraft, TeamSide,
};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "matchops")]
#[command(about = "Operator console for match lifecycle management", long_about = None)]
struct Cli {
    /// Match store file (created on first write)
    #[arg(long, default_value = "matches.json")]
    store: PathBuf,

    /// Operator display name for lock-holding commands
    #[arg(long, default_value = "console")]
    operator: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a match in UPCOMING state
    Create {
        #[arg(long)]
        competition: String,

        /// football | basketball | volleyball
        #[arg(long)]
        game_type: String,

        #[arg(long)]
        home: String,

        #[arg(long)]
        away: String,

        #[arg(long)]
        venue: String,

        /// Kickoff date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Kickoff time, HH:MM
        #[arg(long)]
        time: String,
    },

    /// List matches, optionally by status
    List {
        /// UPCOMING | LIVE | COMPLETED
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one match in full
    Show {
        #[arg(long)]
        id: MatchId,
    },

    /// Run the setup wizard from a setup file and take the match live
    Setup {
        #[arg(long)]
        id: MatchId,

        /// JSON file with rosters, officials and game settings
        #[arg(long)]
        file: PathBuf,
    },

    /// Overwrite the scoreboard
    Score {
        #[arg(long)]
        id: MatchId,

        #[arg(long)]
        home: u32,

        #[arg(long)]
        away: u32,
    },

    /// Record a goal event
    Goal {
        #[arg(long)]
        id: MatchId,

        /// home | away
        #[arg(long)]
        side: String,

        #[arg(long)]
        player: String,

        #[arg(long)]
        minute: u8,
    },

    /// Release match management without changing match status
    End {
        #[arg(long)]
        id: MatchId,
    },

    /// Mark a live match COMPLETED
    Complete {
        #[arg(long)]
        id: MatchId,
    },
}

/// On-disk shape of the `setup --file` payload.
#[derive(Debug, Deserialize)]
struct SetupFile {
    #[serde(default)]
    home_roster: Vec<matchops_core::RosterPlayer>,
    #[serde(default)]
    away_roster: Vec<matchops_core::RosterPlayer>,
    #[serde(default)]
    officials: std::collections::BTreeMap<matchops_core::OfficialRole, String>,
    #[serde(default)]
    settings: Option<GameSettings>,
}

fn parse_game_type(s: &str) -> Result<GameType> {
    match s.to_ascii_lowercase().as_str() {
        "football" => Ok(GameType::Football),
        "basketball" => Ok(GameType::Basketball),
        "volleyball" => Ok(GameType::Volleyball),
        other => bail!("unknown game type '{other}' (football | basketball | volleyball)"),
    }
}

fn parse_side(s: &str) -> Result<TeamSide> {
    match s.to_ascii_lowercase().as_str() {
        "home" => Ok(TeamSide::Home),
        "away" => Ok(TeamSide::Away),
        other => bail!("unknown side '{other}' (home | away)"),
    }
}

fn parse_status(s: &str) -> Result<MatchStatus> {
    match s.to_ascii_uppercase().as_str() {
        "UPCOMING" => Ok(MatchStatus::Upcoming),
        "LIVE" => Ok(MatchStatus::Live),
        "COMPLETED" => Ok(MatchStatus::Completed),
        other => bail!("unknown status '{other}' (UPCOMING | LIVE | COMPLETED)"),
    }
}

fn print_row(record: &MatchRecord) {
    println!(
        "{}  [{}]  {}  {} @ {}",
        record.id,
        record.status,
        record.scoreline(),
        record.competition,
        record.venue
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = FileStore::open(&cli.store)
        .with_context(|| format!("opening store {}", cli.store.display()))?;
    let mut manager = LifecycleManager::new(Box::new(store));
    let session = OperatorSession::new(cli.operator.clone());

    match cli.command {
        Commands::Create { competition, game_type, home, away, venue, date, time } => {
            let record = manager.create_match(&NewMatch {
                competition,
                game_type: parse_game_type(&game_type)?,
                home_team: home,
                away_team: away,
                venue,
                date,
                start_time: time,
            })?;
            println!("Created match {}", record.id);
            print_row(&record);
        }

        Commands::List { status } => {
            let filter = status.as_deref().map(parse_status).transpose()?;
            let matches = manager.list_matches()?;
            let mut shown = 0;
            for record in &matches {
                if filter.map(|s| record.status == s).unwrap_or(true) {
                    print_row(record);
                    shown += 1;
                }
            }
            println!("{} match(es)", shown);
        }

        Commands::Show { id } => {
            let record = manager.get_match(id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Setup { id, file } => {
            manager.check_availability(id, &session)?;

            let handle = manager.initialize_setup(id, &session)?;
            let mut wizard = match handle {
                SetupHandle::Setup(w) => w,
                SetupHandle::Scoreboard(record) => {
                    println!("Match is already live, joining as scoreboard viewer:");
                    print_row(&record);
                    return Ok(());
                }
            };

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading setup file {}", file.display()))?;
            let setup_file: SetupFile = serde_json::from_str(&raw)?;

            wizard.submit_teams(TeamSetupDraft {
                home_roster: setup_file.home_roster,
                away_roster: setup_file.away_roster,
                settings: setup_file.settings.unwrap_or_default(),
            })?;
            wizard.submit_officials(OfficialsDraft { officials: setup_file.officials })?;
            let setup = wizard.finish()?;

            let live = manager.start_live_match(id, setup, &session)?;
            println!("Match is live:");
            print_row(&live);
            manager.end_match_management(id, &session);
        }

        Commands::Score { id, home, away } => {
            let record =
                manager.update_score(id, ScoreUpdate { home_score: home, away_score: away })?;
            print_row(&record);
        }

        Commands::Goal { id, side, player, minute } => {
            let event = MatchEvent::goal(parse_side(&side)?, player, minute);
            let record = manager.record_event(id, event)?;
            print_row(&record);
        }

        Commands::End { id } => {
            let record = manager.get_match(id)?;
            manager.end_match_management(id, &session);
            println!("Ended management of match {} (status unchanged)", id);
            print_row(&record);
        }

        Commands::Complete { id } => {
            let record = manager.complete_match(id, &session)?;
            println!("Match completed:");
            print_row(&record);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_type() {
        assert_eq!(parse_game_type("Football").unwrap(), GameType::Football);
        assert!(parse_game_type("cricket").is_err());
    }

    #[test]
    fn test_parse_side_and_status() {
        assert_eq!(parse_side("AWAY").unwrap(), TeamSide::Away);
        assert_eq!(parse_status("live").unwrap(), MatchStatus::Live);
        assert!(parse_status("PAUSED").is_err());
    }

    #[test]
    fn test_end_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "matchops",
            "--operator",
            "Alice",
            "end",
            "--id",
            "00000000-0000-0000-0000-000000000000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::End { .. }));
    }

    #[test]
    fn test_setup_file_minimal() {
        let parsed: SetupFile = serde_json::from_str("{}").unwrap();
        assert!(parsed.home_roster.is_empty());
        assert!(parsed.settings.is_none());
    }
}

//! JSON boundary for the lifecycle manager.
//!
//! Each operation group gets one `handle_*_json` entry point taking the raw
//! request body and returning the response body. Errors come back as
//! `{"error": "<code>: <message>"}` so embedding layers can pattern-match
//! on the code without parsing prose.

use serde::{Deserialize, Serialize};

use crate::error::OpsError;
use crate::manager::{LifecycleManager, ScoreUpdate};
use crate::models::{MatchEvent, MatchId, MatchRecord, NewMatch, TeamSide};

pub const API_SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const NOT_FOUND: &str = "E_NOT_FOUND";
    pub const CONFLICT: &str = "E_CONFLICT";
    pub const VALIDATION: &str = "E_VALIDATION";
    pub const NETWORK: &str = "E_NETWORK";
    pub const SCHEMA: &str = "E_SCHEMA";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!(r#"{{"error": "{}: {}"}}"#, code, message)
}

fn ops_error_json(err: &OpsError) -> String {
    let code = match err {
        OpsError::NotFound { .. } => error_codes::NOT_FOUND,
        OpsError::Conflict { .. } => error_codes::CONFLICT,
        OpsError::Validation(_) => error_codes::VALIDATION,
        OpsError::Network(_) | OpsError::Io(_) => error_codes::NETWORK,
        OpsError::Serialization(_) | OpsError::VersionMismatch { .. } => error_codes::SCHEMA,
    };
    err_code(code, err)
}

fn check_schema_version(version: u8) -> Result<(), String> {
    if version != API_SCHEMA_VERSION {
        return Err(err_code(
            error_codes::SCHEMA,
            format!("unsupported schema_version {version}, expected {API_SCHEMA_VERSION}"),
        ));
    }
    Ok(())
}

fn record_json(record: &MatchRecord) -> String {
    serde_json::to_string(record).unwrap_or_else(|e| err_code(error_codes::SCHEMA, e))
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub data: NewMatch,
}

#[derive(Debug, Deserialize)]
pub struct ScoreUpdateRequest {
    pub schema_version: u8,
    pub match_id: MatchId,
    /// Signed on the wire so that negative input can be rejected with a
    /// validation error instead of a deserialization failure.
    pub home_score: i64,
    pub away_score: i64,
}

#[derive(Debug, Deserialize)]
pub struct GoalEventRequest {
    pub schema_version: u8,
    pub match_id: MatchId,
    pub side: TeamSide,
    pub player: String,
    pub minute: u8,
}

#[derive(Debug, Serialize)]
struct MatchListResponse {
    schema_version: u8,
    matches: Vec<MatchRecord>,
}

/// `GET /matches`
pub fn handle_list_matches_json(manager: &LifecycleManager) -> String {
    match manager.list_matches() {
        Ok(matches) => serde_json::to_string(&MatchListResponse {
            schema_version: API_SCHEMA_VERSION,
            matches,
        })
        .unwrap_or_else(|e| err_code(error_codes::SCHEMA, e)),
        Err(e) => ops_error_json(&e),
    }
}

/// `POST /matches`
pub fn handle_create_match_json(manager: &mut LifecycleManager, request_json: &str) -> String {
    let request: CreateMatchRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => return err_code(error_codes::VALIDATION, e),
    };
    if let Err(body) = check_schema_version(request.schema_version) {
        return body;
    }

    match manager.create_match(&request.data) {
        Ok(record) => record_json(&record),
        Err(e) => ops_error_json(&e),
    }
}

/// `PUT /matches/{id}` with score fields.
pub fn handle_update_score_json(manager: &mut LifecycleManager, request_json: &str) -> String {
    let request: ScoreUpdateRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => return err_code(error_codes::VALIDATION, e),
    };
    if let Err(body) = check_schema_version(request.schema_version) {
        return body;
    }

    let (home_score, away_score) =
        match (u32::try_from(request.home_score), u32::try_from(request.away_score)) {
            (Ok(h), Ok(a)) => (h, a),
            _ => {
                return err_code(
                    error_codes::VALIDATION,
                    format!(
                        "scores must be non-negative, got {}:{}",
                        request.home_score, request.away_score
                    ),
                )
            }
        };

    let update = ScoreUpdate { home_score, away_score };
    match manager.update_score(request.match_id, update) {
        Ok(record) => record_json(&record),
        Err(e) => ops_error_json(&e),
    }
}

/// `PUT /matches/{id}` appending a goal event.
pub fn handle_record_goal_json(manager: &mut LifecycleManager, request_json: &str) -> String {
    let request: GoalEventRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => return err_code(error_codes::VALIDATION, e),
    };
    if let Err(body) = check_schema_version(request.schema_version) {
        return body;
    }

    let event = MatchEvent::goal(request.side, request.player, request.minute);
    match manager.record_event(request.match_id, event) {
        Ok(record) => record_json(&record),
        Err(e) => ops_error_json(&e),
    }
}

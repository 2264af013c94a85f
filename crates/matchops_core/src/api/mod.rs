pub mod json_api;

pub use json_api::{
    handle_create_match_json, handle_list_matches_json, handle_record_goal_json,
    handle_update_score_json, CreateMatchRequest, GoalEventRequest, ScoreUpdateRequest,
    API_SCHEMA_VERSION,
};

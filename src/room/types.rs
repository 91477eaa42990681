use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::{RoomModel, Slot};
use crate::shared::AppError;

/// Action names accepted in the `action` field
pub const ACTIONS: [&str; 4] = ["join", "status", "submit", "reset"];

/// Request body of the game endpoint, one variant per action
///
/// Fields an action does not use are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RoomAction {
    Join {
        #[serde(rename = "roomCode")]
        room_code: String,
        username: String,
    },
    Status {
        #[serde(rename = "roomCode")]
        room_code: String,
    },
    Submit {
        #[serde(rename = "roomCode")]
        room_code: String,
        slot: Slot,
        choices: Vec<Value>,
    },
    Reset {
        #[serde(rename = "roomCode")]
        room_code: String,
    },
}

impl RoomAction {
    /// Parses a raw request body
    ///
    /// Only a zero-length body reads as `{}`; whitespace is malformed JSON.
    /// Anything whose `action` is not one of
    /// [`ACTIONS`] is an [`AppError::InvalidAction`], whatever else it holds.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = if body.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body)
                .map_err(|e| AppError::BadRequest(format!("Malformed request body: {}", e)))?
        };

        let known_action = value
            .get("action")
            .and_then(Value::as_str)
            .is_some_and(|action| ACTIONS.contains(&action));
        if !known_action {
            return Err(AppError::InvalidAction);
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid request fields: {}", e)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoomAction::Join { .. } => "join",
            RoomAction::Status { .. } => "status",
            RoomAction::Submit { .. } => "submit",
            RoomAction::Reset { .. } => "reset",
        }
    }

    pub fn room_code(&self) -> &str {
        match self {
            RoomAction::Join { room_code, .. }
            | RoomAction::Status { room_code }
            | RoomAction::Submit { room_code, .. }
            | RoomAction::Reset { room_code } => room_code,
        }
    }
}

/// Response for a successful join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub slot: Slot,
    pub room: RoomModel,
}

/// Response for submit and reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

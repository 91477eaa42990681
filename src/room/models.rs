use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

/// Status written on creation and on reset; other values come from outside
pub const STATUS_WAITING: &str = "waiting";

/// A player's seat in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    User1,
    User2,
}

/// Row of the `rooms` table
///
/// Other writers share the table, so `status` may be null and the choice
/// columns may hold any JSON; rows are relayed as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    pub room_code: String,
    #[serde(default)]
    pub user1_name: Option<String>,
    #[serde(default)]
    pub user2_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user1_choices: Option<Value>,
    #[serde(default)]
    pub user2_choices: Option<Value>,
    /// Columns owned by the store (ids, timestamps), relayed untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoomModel {
    /// A freshly created room as the store would return it
    pub fn from_new(room: &NewRoom) -> Self {
        Self {
            room_code: room.room_code.clone(),
            user1_name: Some(room.user1_name.clone()),
            user2_name: None,
            status: Some(room.status.clone()),
            user1_choices: None,
            user2_choices: None,
            extra: Map::new(),
        }
    }

    /// Slot held by `username`, compared by exact string equality
    pub fn slot_of(&self, username: &str) -> Option<Slot> {
        if self.user1_name.as_deref() == Some(username) {
            Some(Slot::User1)
        } else if self.user2_name.as_deref() == Some(username) {
            Some(Slot::User2)
        } else {
            None
        }
    }

    /// Second seat is still free (empty names count as free)
    pub fn has_open_seat(&self) -> bool {
        self.user2_name.as_deref().map_or(true, str::is_empty)
    }

    pub fn choices(&self, slot: Slot) -> Option<&Value> {
        match slot {
            Slot::User1 => self.user1_choices.as_ref(),
            Slot::User2 => self.user2_choices.as_ref(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status.as_deref() == Some(STATUS_WAITING)
    }

    /// Applies a partial update the way the store does
    pub fn apply(&mut self, patch: &RoomPatch) {
        if let Some(name) = &patch.user2_name {
            self.user2_name = Some(name.clone());
        }
        if let Some(choices) = &patch.user1_choices {
            self.user1_choices = Some(Value::Array(choices.clone()));
        }
        if let Some(choices) = &patch.user2_choices {
            self.user2_choices = Some(Value::Array(choices.clone()));
        }
        if let Some(status) = &patch.status {
            self.status = Some(status.clone());
        }
    }
}

/// Insert body for a room created by its first player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoom {
    pub room_code: String,
    pub user1_name: String,
    pub status: String,
}

impl NewRoom {
    pub fn new(room_code: &str, host_name: &str) -> Self {
        Self {
            room_code: room_code.to_string(),
            user1_name: host_name.to_string(),
            status: STATUS_WAITING.to_string(),
        }
    }
}

/// Partial update; only the fields that are set get sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user2_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user1_choices: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user2_choices: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RoomPatch {
    pub fn claim_second_seat(username: &str) -> Self {
        Self {
            user2_name: Some(username.to_string()),
            ..Self::default()
        }
    }

    pub fn choices(slot: Slot, choices: Vec<Value>) -> Self {
        match slot {
            Slot::User1 => Self {
                user1_choices: Some(choices),
                ..Self::default()
            },
            Slot::User2 => Self {
                user2_choices: Some(choices),
                ..Self::default()
            },
        }
    }

    /// Clears both players' choices and puts the room back to waiting
    pub fn reset() -> Self {
        Self {
            user1_choices: Some(Vec::new()),
            user2_choices: Some(Vec::new()),
            status: Some(STATUS_WAITING.to_string()),
            ..Self::default()
        }
    }
}

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{NewRoom, RoomModel, RoomPatch, Slot},
    types::{AckResponse, JoinResponse, RoomAction},
};
use crate::shared::{AppError, SharedRoomRepository};

/// Service for handling room business logic
pub struct RoomService {
    repository: SharedRoomRepository,
}

impl RoomService {
    pub fn new(repository: SharedRoomRepository) -> Self {
        Self { repository }
    }

    /// Runs one request action and renders its success body
    pub async fn dispatch(&self, action: RoomAction) -> Result<Response, AppError> {
        let response = match action {
            RoomAction::Join {
                room_code,
                username,
            } => Json(self.join(&room_code, &username).await?).into_response(),
            RoomAction::Status { room_code } => {
                Json(self.status(&room_code).await?).into_response()
            }
            RoomAction::Submit {
                room_code,
                slot,
                choices,
            } => {
                self.submit(&room_code, slot, choices).await?;
                Json(AckResponse::ok()).into_response()
            }
            RoomAction::Reset { room_code } => {
                self.reset(&room_code).await?;
                Json(AckResponse::ok()).into_response()
            }
        };

        Ok(response)
    }

    /// Seats `username` in the room, creating the room if the code is new
    ///
    /// Slot 1 goes to whoever arrives first, slot 2 to the next distinct
    /// name. Names already seated get their slot back without any write.
    #[instrument(skip(self))]
    pub async fn join(&self, room_code: &str, username: &str) -> Result<JoinResponse, AppError> {
        let Some(room) = self.repository.find_room_by_code(room_code).await? else {
            let room = self
                .repository
                .create_room(&NewRoom::new(room_code, username))
                .await?;

            info!(room_code = %room_code, username = %username, "Room created, player seated as user1");
            return Ok(JoinResponse {
                slot: Slot::User1,
                room,
            });
        };

        if let Some(slot) = room.slot_of(username) {
            debug!(room_code = %room_code, username = %username, slot = %slot, "Player already seated");
            return Ok(JoinResponse { slot, room });
        }

        if !room.has_open_seat() {
            info!(room_code = %room_code, username = %username, "Join rejected, room is full");
            return Err(AppError::RoomFull);
        }

        let room = self
            .repository
            .update_room(room_code, &RoomPatch::claim_second_seat(username))
            .await?
            .ok_or_else(|| {
                warn!(room_code = %room_code, "Room vanished before second seat was claimed");
                AppError::DatabaseError(format!("room {} no longer exists", room_code))
            })?;

        info!(room_code = %room_code, username = %username, "Player seated as user2");
        Ok(JoinResponse {
            slot: Slot::User2,
            room,
        })
    }

    /// Current room record; `None` when no room has this code
    #[instrument(skip(self))]
    pub async fn status(&self, room_code: &str) -> Result<Option<RoomModel>, AppError> {
        self.repository.find_room_by_code(room_code).await
    }

    /// Stores one player's choices, leaving the other player's untouched
    #[instrument(skip(self, choices), fields(choice_count = choices.len()))]
    pub async fn submit(
        &self,
        room_code: &str,
        slot: Slot,
        choices: Vec<Value>,
    ) -> Result<(), AppError> {
        let updated = self
            .repository
            .update_room(room_code, &RoomPatch::choices(slot, choices))
            .await?;

        match updated {
            Some(_) => info!(room_code = %room_code, slot = %slot, "Choices submitted"),
            None => debug!(room_code = %room_code, slot = %slot, "Submit matched no room"),
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn reset(&self, room_code: &str) -> Result<(), AppError> {
        let updated = self
            .repository
            .update_room(room_code, &RoomPatch::reset())
            .await?;

        match updated {
            Some(_) => info!(room_code = %room_code, "Room reset for a new round"),
            None => debug!(room_code = %room_code, "Reset matched no room"),
        }

        Ok(())
    }
}

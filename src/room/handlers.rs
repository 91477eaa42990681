use axum::{body::Bytes, extract::State, response::Response};
use tracing::{info, instrument, warn};

use super::{service::RoomService, types::RoomAction};
use crate::shared::{AppError, AppState};

/// HTTP handler for the game endpoint
///
/// POST /game-api
/// Body: `{action, roomCode, username?, choices?, slot?}`
///
/// The store configuration is checked before the body is read, so a
/// misconfigured server answers every request the same way.
#[instrument(name = "game_api", skip(state, body))]
pub async fn handle_action(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let repository = state.room_repository().inspect_err(|_| {
        warn!("Room store is not configured");
    })?;

    let action = RoomAction::from_body(&body)?;
    info!(action = action.name(), room_code = %action.room_code(), "Handling room action");

    RoomService::new(repository).dispatch(action).await
}

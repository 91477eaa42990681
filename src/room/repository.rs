use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewRoom, RoomModel, RoomPatch};
use crate::shared::AppError;

/// Trait for room repository operations
///
/// Rooms are keyed by their client-chosen code. There is no locking or
/// version check: concurrent writers to one room are last-write-wins.
#[async_trait]
pub trait RoomRepository {
    async fn find_room_by_code(&self, room_code: &str) -> Result<Option<RoomModel>, AppError>;

    /// Inserts a room and returns the stored row
    async fn create_room(&self, room: &NewRoom) -> Result<RoomModel, AppError>;

    /// Applies `patch` to the room with `room_code`; `None` when no row matched
    async fn update_room(
        &self,
        room_code: &str,
        patch: &RoomPatch,
    ) -> Result<Option<RoomModel>, AppError>;
}

/// In-memory implementation of RoomRepository for development and testing
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    pub fn room_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, RoomModel>> {
        self.rooms
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn find_room_by_code(&self, room_code: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_code = %room_code, "Fetching room from memory");

        let room = self.lock().get(room_code).cloned();

        match &room {
            Some(r) => debug!(room_code = %room_code, status = ?r.status, "Room found in memory"),
            None => debug!(room_code = %room_code, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &NewRoom) -> Result<RoomModel, AppError> {
        debug!(room_code = %room.room_code, user1_name = %room.user1_name, "Creating room in memory");

        let mut rooms = self.lock();
        if rooms.contains_key(&room.room_code) {
            warn!(room_code = %room.room_code, "Room already exists in memory");
            return Err(AppError::DatabaseError(format!(
                "duplicate key value violates unique constraint on room_code \"{}\"",
                room.room_code
            )));
        }

        let stored = RoomModel::from_new(room);
        rooms.insert(stored.room_code.clone(), stored.clone());

        debug!(room_code = %room.room_code, "Room created successfully in memory");
        Ok(stored)
    }

    #[instrument(skip(self, patch))]
    async fn update_room(
        &self,
        room_code: &str,
        patch: &RoomPatch,
    ) -> Result<Option<RoomModel>, AppError> {
        debug!(room_code = %room_code, ?patch, "Updating room in memory");

        let mut rooms = self.lock();
        let Some(room) = rooms.get_mut(room_code) else {
            debug!(room_code = %room_code, "No room matched update");
            return Ok(None);
        };

        room.apply(patch);
        Ok(Some(room.clone()))
    }
}

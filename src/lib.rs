// Library crate for the room relay server
// This file exposes the public API for integration tests

pub mod config;
pub mod room;
pub mod routes;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigError, StoreConfig};
pub use room::{
    models::{RoomModel, Slot},
    repository::{InMemoryRoomRepository, RoomRepository},
    rest::RestRoomRepository,
    service::RoomService,
};
pub use routes::router;
pub use shared::{AppError, AppState};

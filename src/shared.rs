use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, StoreConfig};
use crate::room::repository::{InMemoryRoomRepository, RoomRepository};
use crate::room::rest::RestRoomRepository;

pub type SharedRoomRepository = Arc<dyn RoomRepository + Send + Sync>;

/// Shared application state containing all dependencies
///
/// The repository is absent when the store configuration could not be
/// loaded at startup; every game request then fails with
/// [`AppError::MissingConfiguration`].
#[derive(Clone)]
pub struct AppState {
    room_repository: Option<SharedRoomRepository>,
}

impl AppState {
    pub fn new(room_repository: SharedRoomRepository) -> Self {
        Self {
            room_repository: Some(room_repository),
        }
    }

    /// Wires the configured store; no store leaves the state unconfigured
    pub fn from_config(config: &Config) -> Self {
        match &config.store {
            Some(StoreConfig::Rest { base_url, api_key }) => {
                info!(base_url = %base_url, "Using REST room store");
                Self::new(Arc::new(RestRoomRepository::new(
                    base_url.clone(),
                    api_key.clone(),
                )))
            }
            Some(StoreConfig::Memory) => {
                warn!("Using in-memory room store, rooms are lost on restart");
                Self::new(Arc::new(InMemoryRoomRepository::new()))
            }
            None => Self::unconfigured(),
        }
    }

    /// State for a server started without its store configuration
    pub fn unconfigured() -> Self {
        Self {
            room_repository: None,
        }
    }

    pub fn room_repository(&self) -> Result<SharedRoomRepository, AppError> {
        self.room_repository
            .as_ref()
            .map(Arc::clone)
            .ok_or(AppError::MissingConfiguration)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing Environment Variables")]
    MissingConfiguration,

    #[error("Invalid Action")]
    InvalidAction,

    #[error("Room Full")]
    RoomFull,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Plain-text bodies, kept for existing clients
            AppError::MissingConfiguration => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Missing Environment Variables",
                )
                    .into_response()
            }
            AppError::InvalidAction => {
                return (StatusCode::BAD_REQUEST, "Invalid Action").into_response()
            }
            AppError::RoomFull => (StatusCode::BAD_REQUEST, "Room Full".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

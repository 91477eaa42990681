use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{
    models::{NewRoom, RoomModel, RoomPatch},
    repository::RoomRepository,
};
use crate::shared::AppError;

const ROOMS_TABLE: &str = "rooms";

/// Room repository backed by a PostgREST-style HTTP API (Supabase)
///
/// Every call sends the API key both as `apikey` and as a bearer token and
/// asks the store to echo the affected rows back.
pub struct RestRoomRepository {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestRoomRepository {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
    }

    fn code_filter(room_code: &str) -> (&'static str, String) {
        ("room_code", format!("eq.{}", room_code))
    }

    /// Checks the status and decodes the row list the store answers with
    async fn rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Room store rejected request");
            return Err(AppError::DatabaseError(format!(
                "store responded with {}: {}",
                status, body
            )));
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            warn!(error = %e, "Failed to decode room store response");
            AppError::DatabaseError(format!("unreadable store response: {}", e))
        })
    }
}

#[async_trait]
impl RoomRepository for RestRoomRepository {
    #[instrument(skip(self))]
    async fn find_room_by_code(&self, room_code: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_code = %room_code, "Fetching room from store");

        let response = self
            .request(Method::GET, ROOMS_TABLE)
            .query(&[Self::code_filter(room_code), ("select", "*".to_string())])
            .send()
            .await?;

        let room = Self::rows::<RoomModel>(response).await?.into_iter().next();

        match &room {
            Some(r) => debug!(room_code = %room_code, status = ?r.status, "Room found in store"),
            None => debug!(room_code = %room_code, "Room not found in store"),
        }

        Ok(room)
    }

    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &NewRoom) -> Result<RoomModel, AppError> {
        debug!(room_code = %room.room_code, user1_name = %room.user1_name, "Creating room in store");

        let response = self
            .request(Method::POST, ROOMS_TABLE)
            .json(room)
            .send()
            .await?;

        Self::rows::<RoomModel>(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!(room_code = %room.room_code, "Store returned no row for created room");
                AppError::DatabaseError("store returned no row for created room".to_string())
            })
    }

    #[instrument(skip(self, patch))]
    async fn update_room(
        &self,
        room_code: &str,
        patch: &RoomPatch,
    ) -> Result<Option<RoomModel>, AppError> {
        debug!(room_code = %room_code, ?patch, "Updating room in store");

        let response = self
            .request(Method::PATCH, ROOMS_TABLE)
            .query(&[Self::code_filter(room_code)])
            .json(patch)
            .send()
            .await?;

        let room = Self::rows::<RoomModel>(response).await?.into_iter().next();
        if room.is_none() {
            debug!(room_code = %room_code, "No room matched update");
        }

        Ok(room)
    }
}

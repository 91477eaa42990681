use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{room, shared::AppState};

pub const GAME_API_PATH: &str = "/game-api";
/// Path the game client used when the handler ran as a Netlify function
pub const LEGACY_GAME_API_PATH: &str = "/.netlify/functions/game-api";

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route(GAME_API_PATH, post(room::handle_action))
        .route(LEGACY_GAME_API_PATH, post(room::handle_action))
        .layer(TraceLayer::new_for_http())
        // The game page is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

/// Sends game requests straight into a router
#[derive(Clone)]
pub struct GameClient {
    app: Router,
}

impl GameClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn send_raw(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Posts `body` to the game endpoint; non-JSON replies come back as a string value
    pub async fn send(&self, body: Value) -> (StatusCode, Value) {
        let (status, text) = self.send_raw("/game-api", &body.to_string()).await;
        let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        (status, value)
    }

    pub async fn join(&self, room_code: &str, username: &str) -> (StatusCode, Value) {
        self.send(json!({
            "action": "join",
            "roomCode": room_code,
            "username": username,
        }))
        .await
    }

    pub async fn status(&self, room_code: &str) -> (StatusCode, Value) {
        self.send(json!({"action": "status", "roomCode": room_code}))
            .await
    }

    pub async fn submit(&self, room_code: &str, slot: &str, choices: Value) -> (StatusCode, Value) {
        self.send(json!({
            "action": "submit",
            "roomCode": room_code,
            "slot": slot,
            "choices": choices,
        }))
        .await
    }

    pub async fn reset(&self, room_code: &str) -> (StatusCode, Value) {
        self.send(json!({"action": "reset", "roomCode": room_code}))
            .await
    }
}

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Minimal PostgREST stand-in serving the `rooms` table
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StoreInner {
    rows: Vec<Value>,
    requests: Vec<RecordedRequest>,
    next_id: u64,
    failure: Option<(StatusCode, String)>,
}

type SharedStore = Arc<Mutex<StoreInner>>;

#[derive(Clone)]
pub struct FakeStore {
    inner: SharedStore,
    pub base_url: String,
}

impl FakeStore {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(StoreInner {
            next_id: 1,
            ..StoreInner::default()
        }));

        let app = Router::new()
            .route(
                "/rest/v1/rooms",
                get(handle_rooms).post(handle_rooms).patch(handle_rooms),
            )
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            inner,
            base_url: format!("http://{}", addr),
        }
    }

    /// Makes every following request answer with `status` and `body`
    pub fn fail_with(&self, status: StatusCode, body: &str) {
        self.inner.lock().unwrap().failure = Some((status, body.to_string()));
    }

    pub fn insert_row(&self, row: Value) {
        self.inner.lock().unwrap().rows.push(row);
    }

    pub fn rows(&self) -> Vec<Value> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn code_filter(query: &HashMap<String, String>) -> Option<String> {
    query
        .get("room_code")
        .and_then(|filter| filter.strip_prefix("eq."))
        .map(str::to_string)
}

fn merge_fields(row: &mut Value, fields: &Option<Value>) {
    if let Some(Value::Object(fields)) = fields {
        for (key, value) in fields {
            row[key.as_str()] = value.clone();
        }
    }
}

async fn handle_rooms(
    State(inner): State<SharedStore>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let body: Option<Value> = serde_json::from_str(&body).ok();
    let mut store = inner.lock().unwrap();
    store.requests.push(RecordedRequest {
        method: method.clone(),
        query: query.clone(),
        headers,
        body: body.clone(),
    });

    if let Some((status, message)) = store.failure.clone() {
        return (status, message).into_response();
    }

    let code = code_filter(&query);
    let matches = |row: &Value| code.as_deref().is_some_and(|c| row["room_code"] == c);

    match method {
        Method::GET => {
            let rows: Vec<Value> = store.rows.iter().filter(|row| matches(*row)).cloned().collect();
            Json(rows).into_response()
        }
        Method::POST => {
            let mut row = json!({
                "id": store.next_id,
                "created_at": "2024-01-01T00:00:00+00:00",
                "user2_name": null,
                "user1_choices": null,
                "user2_choices": null,
            });
            store.next_id += 1;
            merge_fields(&mut row, &body);
            store.rows.push(row.clone());
            (StatusCode::CREATED, Json(vec![row])).into_response()
        }
        Method::PATCH => {
            let mut updated = Vec::new();
            for row in store.rows.iter_mut().filter(|row| matches(&**row)) {
                merge_fields(row, &body);
                updated.push(row.clone());
            }
            Json(updated).into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

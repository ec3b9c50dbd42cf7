// In-process stand-in for the laboratory backend.
// - bound to 127.0.0.1:0 so suites can run in parallel
// - clients skip proxies so localhost is never hijacked
// - every request is recorded for header/body assertions
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use labdesk_lib::{
    api::ApiClient,
    config::ClientConfig,
    models::{Lab, Room, User},
    notify::Notification,
    AppState,
};
use serde_json::{json, Map, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};

pub const TOKEN: &str = "T";
pub const EMAIL: &str = "ana@uni.edu";
pub const PASSWORD: &str = "secret";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

pub struct Backend {
    pub labs: Vec<Lab>,
    pub rooms: Vec<Room>,
    pub bookings: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
    /// Served once, in place of the normal answer.
    pub override_next: Option<(StatusCode, String)>,
    /// Reject every token from now on.
    pub tokens_expired: bool,
    next_lab_id: i64,
    next_room_id: i64,
    next_booking_id: i64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            labs: Vec::new(),
            rooms: Vec::new(),
            bookings: Vec::new(),
            requests: Vec::new(),
            override_next: None,
            tokens_expired: false,
            next_lab_id: 1,
            next_room_id: 1,
            next_booking_id: 1,
        }
    }
}

impl Backend {
    pub fn with_lab(mut self, id: i64, name: &str) -> Self {
        self.labs.push(lab(id, name));
        self.next_lab_id = self.next_lab_id.max(id + 1);
        self
    }

    pub fn with_room(mut self, id: i64, lab_id: i64) -> Self {
        self.rooms.push(room(id, lab_id));
        self.next_room_id = self.next_room_id.max(id + 1);
        self
    }

    pub fn with_booking(mut self, id: i64, room_id: i64) -> Self {
        self.bookings.push(json!({
            "id": id,
            "roomId": room_id,
            "startTime": "2026-10-20T09:00:00Z",
            "endTime": "2026-10-20T11:00:00Z",
            "requester": "ana@uni.edu",
        }));
        self.next_booking_id = self.next_booking_id.max(id + 1);
        self
    }

    fn lab_with_rooms(&self, lab: &Lab) -> Lab {
        let mut lab = lab.clone();
        lab.rooms = self
            .rooms
            .iter()
            .filter(|room| room.lab_id == lab.id)
            .cloned()
            .collect();
        lab
    }
}

pub fn lab(id: i64, name: &str) -> Lab {
    Lab {
        id,
        name: name.to_string(),
        location: "Block A".to_string(),
        capacity: 40,
        description: None,
        rooms: Vec::new(),
    }
}

pub fn room(id: i64, lab_id: i64) -> Room {
    Room {
        id,
        name: format!("Room {id}"),
        capacity: 20,
        description: None,
        lab_id,
    }
}

pub fn ana() -> User {
    User {
        id: Some(1),
        name: "Ana".to_string(),
        email: EMAIL.to_string(),
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub base_url: String,
    pub backend: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.backend.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.backend.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }

    pub fn override_next(&self, status: StatusCode, body: &str) {
        self.backend.lock().unwrap().override_next = Some((status, body.to_string()));
    }

    pub fn expire_tokens(&self) {
        self.backend.lock().unwrap().tokens_expired = true;
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn spawn_backend(backend: Backend) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shared: Shared = Arc::new(Mutex::new(backend));
    let router = Router::new().fallback(handle).with_state(shared.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    MockServer {
        base_url: format!("http://{addr}"),
        backend: shared,
        shutdown: Some(shutdown_tx),
    }
}

pub fn test_api(base_url: &str) -> ApiClient {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    ApiClient::with_client(http, base_url)
}

pub fn app_state(server: &MockServer, dir: &TempDir) -> AppState {
    let config = ClientConfig {
        api_base_url: server.base_url.clone(),
        data_dir: dir.path().to_path_buf(),
        request_timeout: None,
        debug: false,
    };
    AppState::with_api(config, test_api(&server.base_url)).unwrap()
}

pub async fn signed_in(server: &MockServer, dir: &TempDir) -> AppState {
    let state = app_state(server, dir);
    state.session.login(EMAIL, PASSWORD).await.unwrap();
    state
}

pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn message(status: StatusCode, text: &str) -> Response {
    reply(status, json!({ "message": text }))
}

fn id_at(segments: &[&str], index: usize) -> Option<i64> {
    segments.get(index).and_then(|raw| raw.parse().ok())
}

fn merge_object(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();
    let json_body: Option<Value> = serde_json::from_slice(&body).ok();

    let mut backend = shared.lock().unwrap();
    backend.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: json_body.clone(),
    });

    if let Some((status, raw)) = backend.override_next.take() {
        return (status, raw).into_response();
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let body = json_body.unwrap_or(Value::Null);

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "register"]) => {
            return reply(
                StatusCode::CREATED,
                json!({ "id": 2, "name": body["name"], "email": body["email"] }),
            );
        }
        ("POST", ["auth", "login"]) => {
            if body["email"] == EMAIL && body["password"] == PASSWORD {
                return reply(StatusCode::OK, json!({ "token": TOKEN, "user": ana() }));
            }
            return message(StatusCode::BAD_REQUEST, "Invalid credentials");
        }
        _ => {}
    }

    let authorized = !backend.tokens_expired
        && header_value(header::AUTHORIZATION).as_deref() == Some("Bearer T");
    if !authorized {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "validate-token"]) => {
            reply(StatusCode::OK, json!({ "valid": true, "user": ana() }))
        }

        ("GET", ["labs"]) => {
            let labs: Vec<Lab> = backend.labs.iter().map(|l| backend.lab_with_rooms(l)).collect();
            reply(StatusCode::OK, json!(labs))
        }
        ("POST", ["labs"]) => {
            let id = backend.next_lab_id;
            backend.next_lab_id += 1;
            let mut created = body.clone();
            merge_object(&mut created, &json!({ "id": id }));
            let Ok(lab) = serde_json::from_value::<Lab>(created) else {
                return message(StatusCode::BAD_REQUEST, "Invalid laboratory");
            };
            backend.labs.push(lab.clone());
            reply(StatusCode::CREATED, json!(lab))
        }
        ("PUT", ["labs", _]) => {
            let Some(id) = id_at(&segments, 1) else {
                return message(StatusCode::BAD_REQUEST, "Invalid id");
            };
            let Some(index) = backend.labs.iter().position(|l| l.id == id) else {
                return message(StatusCode::NOT_FOUND, "Lab not found");
            };
            let mut updated = json!(backend.labs[index]);
            merge_object(&mut updated, &body);
            let Ok(lab) = serde_json::from_value::<Lab>(updated) else {
                return message(StatusCode::BAD_REQUEST, "Invalid laboratory");
            };
            backend.labs[index] = lab.clone();
            // Update answers leave rooms out.
            let mut answer = json!(lab);
            if let Some(object) = answer.as_object_mut() {
                object.remove("rooms");
            }
            reply(StatusCode::OK, answer)
        }
        ("DELETE", ["labs", _]) => {
            let Some(id) = id_at(&segments, 1) else {
                return message(StatusCode::BAD_REQUEST, "Invalid id");
            };
            let before = backend.labs.len();
            backend.labs.retain(|l| l.id != id);
            if backend.labs.len() == before {
                return message(StatusCode::NOT_FOUND, "Lab not found");
            }
            backend.rooms.retain(|r| r.lab_id != id);
            StatusCode::NO_CONTENT.into_response()
        }

        ("GET", ["rooms"]) => reply(StatusCode::OK, json!(backend.rooms)),
        ("POST", ["rooms"]) => {
            let id = backend.next_room_id;
            backend.next_room_id += 1;
            let mut created = body.clone();
            merge_object(&mut created, &json!({ "id": id }));
            let Ok(room) = serde_json::from_value::<Room>(created) else {
                return message(StatusCode::BAD_REQUEST, "Invalid room");
            };
            if !backend.labs.iter().any(|l| l.id == room.lab_id) {
                return message(StatusCode::BAD_REQUEST, "Unknown laboratory");
            }
            backend.rooms.push(room.clone());
            reply(StatusCode::CREATED, json!(room))
        }
        ("PUT", ["rooms", _]) => {
            let Some(id) = id_at(&segments, 1) else {
                return message(StatusCode::BAD_REQUEST, "Invalid id");
            };
            let Some(index) = backend.rooms.iter().position(|r| r.id == id) else {
                return message(StatusCode::NOT_FOUND, "Room not found");
            };
            let mut updated = json!(backend.rooms[index]);
            merge_object(&mut updated, &body);
            let Ok(room) = serde_json::from_value::<Room>(updated) else {
                return message(StatusCode::BAD_REQUEST, "Invalid room");
            };
            backend.rooms[index] = room.clone();
            reply(StatusCode::OK, json!(room))
        }
        ("DELETE", ["rooms", _]) => {
            let Some(id) = id_at(&segments, 1) else {
                return message(StatusCode::BAD_REQUEST, "Invalid id");
            };
            let before = backend.rooms.len();
            backend.rooms.retain(|r| r.id != id);
            if backend.rooms.len() == before {
                return message(StatusCode::NOT_FOUND, "Room not found");
            }
            reply(StatusCode::OK, json!({ "message": "Room deleted" }))
        }

        ("GET", ["bookings"]) => reply(StatusCode::OK, json!(backend.bookings)),
        ("GET", ["bookings", "room", _]) => {
            let room_id = id_at(&segments, 2);
            let matching: Vec<Value> = backend
                .bookings
                .iter()
                .filter(|b| b["roomId"].as_i64() == room_id)
                .cloned()
                .collect();
            reply(StatusCode::OK, json!(matching))
        }
        ("POST", ["bookings"]) => {
            let id = backend.next_booking_id;
            backend.next_booking_id += 1;
            let mut created = Value::Object(Map::new());
            merge_object(&mut created, &body);
            merge_object(&mut created, &json!({ "id": id }));
            backend.bookings.push(created.clone());
            reply(StatusCode::CREATED, created)
        }
        ("PUT", ["bookings", _]) => {
            let id = id_at(&segments, 1);
            let Some(index) = backend.bookings.iter().position(|b| b["id"].as_i64() == id) else {
                return message(StatusCode::NOT_FOUND, "Booking not found");
            };
            let mut updated = backend.bookings[index].clone();
            merge_object(&mut updated, &body);
            backend.bookings[index] = updated.clone();
            reply(StatusCode::OK, updated)
        }
        ("DELETE", ["bookings", _]) => {
            let id = id_at(&segments, 1);
            backend.bookings.retain(|b| b["id"].as_i64() != id);
            StatusCode::NO_CONTENT.into_response()
        }

        _ => message(StatusCode::NOT_FOUND, "Not found"),
    }
}

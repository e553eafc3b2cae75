//! In-process fake of the intranet hour entries API.
//!
//! Keeps entries in memory and mimics the real service closely enough for the
//! client to notice differences: the listing omits dates and uses integer
//! ids, writes answer with string ids, `desc` and a nested project client,
//! and a request without the right session cookie is redirected to `/login`.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use intranet_client::SessionClient;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

pub const SESSION_ID: &str = "test-session";

pub const TEST_PROJECT: u64 = 123;
pub const OTHER_PROJECT: u64 = 422;

#[derive(Debug, Clone)]
struct StoredEntry {
    id: u64,
    date: NaiveDate,
    description: String,
    time: f64,
    project_id: u64,
    ticket_id: String,
}

#[derive(Debug)]
struct Intranet {
    next_id: u64,
    entries: BTreeMap<u64, StoredEntry>,
}

type Shared = Arc<Mutex<Intranet>>;

#[derive(Deserialize)]
struct HoursQuery {
    date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteBody {
    #[serde(default)]
    time_entry_id: Option<String>,
    date: NaiveDate,
    description: String,
    project_id: u64,
    ticket_id: String,
    time: f64,
}

#[derive(Deserialize)]
struct DeleteBody {
    id: String,
}

fn project(id: u64) -> Option<(&'static str, &'static str)> {
    match id {
        TEST_PROJECT => Some(("Test Project", "Test Client")),
        OTHER_PROJECT => Some(("Intranet", "STX Next")),
        _ => None,
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("beaker.session.id={SESSION_ID}");
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie == expected)
}

fn login_redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/login")]).into_response()
}

fn mutation_body(entry: &StoredEntry) -> serde_json::Value {
    let (name, client) = project(entry.project_id).unwrap_or_default();
    json!({
        "added": entry.date.format("%Y-%m-%d").to_string(),
        "date": entry.date.format("%d.%m.%Y").to_string(),
        "desc": entry.description,
        "id": entry.id.to_string(),
        "modified": entry.date.format("%Y-%m-%d").to_string(),
        "project": { "client": { "name": client }, "name": name },
        "ticketId": entry.ticket_id,
        "time": entry.time,
        "userID": "7777"
    })
}

async fn list_hours(
    State(intranet): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HoursQuery>,
) -> Response {
    if !authorized(&headers) {
        return login_redirect();
    }
    let intranet = intranet.lock().unwrap();
    let entries: Vec<_> = intranet
        .entries
        .values()
        .filter(|entry| entry.date == query.date)
        .map(|entry| {
            let (name, client) = project(entry.project_id).unwrap_or_default();
            json!({
                "id": entry.id,
                "description": entry.description,
                "time": entry.time,
                "project": { "clientName": client, "id": entry.project_id, "name": name },
                "ticket": { "id": entry.ticket_id }
            })
        })
        .collect();
    Json(json!({ "entries": entries })).into_response()
}

async fn create_entry(
    State(intranet): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<WriteBody>,
) -> Response {
    if !authorized(&headers) {
        return login_redirect();
    }
    if project(body.project_id).is_none() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let mut intranet = intranet.lock().unwrap();
    intranet.next_id += 1;
    let entry = StoredEntry {
        id: intranet.next_id,
        date: body.date,
        description: body.description,
        time: body.time,
        project_id: body.project_id,
        ticket_id: body.ticket_id,
    };
    intranet.entries.insert(entry.id, entry.clone());
    (StatusCode::CREATED, Json(mutation_body(&entry))).into_response()
}

async fn update_entry(
    State(intranet): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<WriteBody>,
) -> Response {
    if !authorized(&headers) {
        return login_redirect();
    }
    let Some(id) = body.time_entry_id.and_then(|id| id.parse::<u64>().ok()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut intranet = intranet.lock().unwrap();
    let Some(entry) = intranet.entries.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    entry.date = body.date;
    entry.description = body.description;
    entry.time = body.time;
    entry.project_id = body.project_id;
    entry.ticket_id = body.ticket_id;
    Json(mutation_body(entry)).into_response()
}

async fn delete_entry(
    State(intranet): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<DeleteBody>,
) -> Response {
    if !authorized(&headers) {
        return login_redirect();
    }
    let removed = body
        .id
        .parse::<u64>()
        .ok()
        .and_then(|id| intranet.lock().unwrap().entries.remove(&id));
    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn app() -> Router {
    let intranet = Arc::new(Mutex::new(Intranet {
        next_id: 2_177_995,
        entries: BTreeMap::new(),
    }));
    Router::new()
        .route("/api/intranet4/hours", get(list_hours))
        .route(
            "/api/intranet4/user_times",
            axum::routing::post(create_entry)
                .put(update_entry)
                .delete(delete_entry),
        )
        .route("/login", get(|| async { "please log in" }))
        .with_state(intranet)
}

/// Starts a fresh fake intranet and returns its API root.
pub async fn spawn_intranet() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn client(base_url: &str, session_id: &str) -> SessionClient {
    SessionClient::builder()
        .base_url(base_url)
        .session_id(session_id)
        .build()
        .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".to_string().into()),
        )
        .with_test_writer()
        .try_init();
}

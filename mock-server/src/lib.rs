//! In-memory stand-in for the Upmind customer API.
//!
//! Serves clients and their nested emails, phones, addresses and companies
//! using the API's response envelope. Every route requires the bearer token
//! the app was built with. `/api/status/{code}` answers with any status,
//! for exercising error handling over a real socket.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Token accepted when none is configured.
pub const DEFAULT_TOKEN: &str = "test-token";

/// Nested collections and the field each one requires on create.
const COLLECTIONS: &[(&str, &str)] = &[
    ("emails", "email"),
    ("phones", "phone"),
    ("addresses", "address_1"),
    ("companies", "name"),
];

pub type Record = Map<String, Value>;

#[derive(Default)]
pub struct Store {
    clients: Vec<Record>,
    /// Keyed by `(client_id, collection)`.
    children: HashMap<(String, String), Vec<Record>>,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<String>,
    store: Arc<RwLock<Store>>,
}

/// Error body in the API's envelope.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
    data: Option<Value>,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.status.as_u16(),
            "message": self.message,
        });
        if let Some(data) = self.data {
            error["data"] = data;
        }
        (self.status, Json(json!({"status": "error", "error": error}))).into_response()
    }
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::new(token.to_string()),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route(
            "/api/clients/{client_id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route(
            "/api/clients/{client_id}/{collection}",
            get(list_children).post(create_child),
        )
        .route(
            "/api/clients/{client_id}/{collection}/{id}",
            get(get_child)
                .put(update_child)
                .patch(update_child)
                .delete(delete_child),
        )
        .route("/api/status/{code}", get(status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return ApiFailure::new(StatusCode::UNAUTHORIZED, "Unauthenticated.").into_response();
    }
    next.run(request).await
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({"status": "ok", "data": data}))
}

fn require_fields(input: &Record, fields: &[&str]) -> Result<(), ApiFailure> {
    let mut errors = Map::new();
    for field in fields {
        let present = input
            .get(*field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !present {
            errors.insert(
                (*field).to_string(),
                json!([format!("The {field} field is required.")]),
            );
        }
    }
    if errors.is_empty() {
        return Ok(());
    }
    Err(ApiFailure {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "The given data was invalid.".to_string(),
        data: Some(Value::Object(errors)),
    })
}

fn required_field(collection: &str) -> Result<&'static str, ApiFailure> {
    COLLECTIONS
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, field)| *field)
        .ok_or_else(ApiFailure::not_found)
}

/// Applies `input` over `record`, leaving the `id` untouched.
fn merge(record: &mut Record, input: Record) {
    for (key, value) in input {
        if key != "id" {
            record.insert(key, value);
        }
    }
}

/// Decodes an update body. No body at all means no changes.
fn update_fields(body: &[u8]) -> Result<Record, ApiFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiFailure::new(StatusCode::BAD_REQUEST, format!("Malformed JSON: {err}")))
}

fn id_of(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    let store = state.store.read().await;
    Json(json!({
        "status": "ok",
        "data": store.clients,
        "meta": {"query": query},
    }))
}

async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<Record>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    require_fields(&input, &["firstname", "email"])?;
    let mut record = Record::new();
    record.insert("id".to_string(), json!(Uuid::new_v4().simple().to_string()));
    merge(&mut record, input);

    state.store.write().await.clients.push(record.clone());
    Ok((StatusCode::CREATED, ok(Value::Object(record))))
}

async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Value>, ApiFailure> {
    let store = state.store.read().await;
    store
        .clients
        .iter()
        .find(|c| id_of(c) == Some(client_id.as_str()))
        .map(|c| ok(Value::Object(c.clone())))
        .ok_or_else(ApiFailure::not_found)
}

async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiFailure> {
    let input = update_fields(&body)?;
    let mut store = state.store.write().await;
    let client = store
        .clients
        .iter_mut()
        .find(|c| id_of(c) == Some(client_id.as_str()))
        .ok_or_else(ApiFailure::not_found)?;
    merge(client, input);
    Ok(ok(Value::Object(client.clone())))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = state.store.write().await;
    let before = store.clients.len();
    store.clients.retain(|c| id_of(c) != Some(client_id.as_str()));
    if store.clients.len() == before {
        return Err(ApiFailure::not_found());
    }
    store.children.retain(|(owner, _), _| *owner != client_id);
    Ok(StatusCode::NO_CONTENT)
}

fn client_exists(store: &Store, client_id: &str) -> Result<(), ApiFailure> {
    if store.clients.iter().any(|c| id_of(c) == Some(client_id)) {
        Ok(())
    } else {
        Err(ApiFailure::not_found())
    }
}

async fn list_children(
    State(state): State<AppState>,
    Path((client_id, collection)): Path<(String, String)>,
) -> Result<Json<Value>, ApiFailure> {
    required_field(&collection)?;
    let store = state.store.read().await;
    client_exists(&store, &client_id)?;
    let items = store
        .children
        .get(&(client_id, collection))
        .cloned()
        .unwrap_or_default();
    Ok(ok(json!(items)))
}

async fn create_child(
    State(state): State<AppState>,
    Path((client_id, collection)): Path<(String, String)>,
    Json(input): Json<Record>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    let field = required_field(&collection)?;
    let mut store = state.store.write().await;
    client_exists(&store, &client_id)?;
    require_fields(&input, &[field])?;

    let mut record = Record::new();
    record.insert("id".to_string(), json!(Uuid::new_v4().simple().to_string()));
    record.insert("client_id".to_string(), json!(client_id));
    merge(&mut record, input);

    store
        .children
        .entry((client_id, collection))
        .or_default()
        .push(record.clone());
    Ok((StatusCode::CREATED, ok(Value::Object(record))))
}

async fn get_child(
    State(state): State<AppState>,
    Path((client_id, collection, id)): Path<(String, String, String)>,
) -> Result<Json<Value>, ApiFailure> {
    required_field(&collection)?;
    let store = state.store.read().await;
    store
        .children
        .get(&(client_id, collection))
        .and_then(|items| items.iter().find(|r| id_of(r) == Some(id.as_str())))
        .map(|r| ok(Value::Object(r.clone())))
        .ok_or_else(ApiFailure::not_found)
}

async fn update_child(
    State(state): State<AppState>,
    Path((client_id, collection, id)): Path<(String, String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiFailure> {
    required_field(&collection)?;
    let input = update_fields(&body)?;
    let mut store = state.store.write().await;
    let record = store
        .children
        .get_mut(&(client_id, collection))
        .and_then(|items| items.iter_mut().find(|r| id_of(r) == Some(id.as_str())))
        .ok_or_else(ApiFailure::not_found)?;
    merge(record, input);
    Ok(ok(Value::Object(record.clone())))
}

async fn delete_child(
    State(state): State<AppState>,
    Path((client_id, collection, id)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiFailure> {
    required_field(&collection)?;
    let mut store = state.store.write().await;
    let items = store
        .children
        .get_mut(&(client_id, collection))
        .ok_or_else(ApiFailure::not_found)?;
    let before = items.len();
    items.retain(|r| id_of(r) != Some(id.as_str()));
    if items.len() == before {
        return Err(ApiFailure::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    if status.is_success() {
        return (status, ok(json!({"code": code}))).into_response();
    }
    ApiFailure::new(status, format!("Status {code}")).into_response()
}

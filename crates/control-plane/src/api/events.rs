// Event CRUD HTTP routes

use crate::storage::StorageBackend;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, Uri},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use webcal_core::Event;

use super::common::{ApiError, ErrorResponse, MessageResponse};
use super::validation::{validate_create_event, validate_date_range};
use crate::services::EventService;

pub const EVENT_ADDED_MESSAGE: &str = "The event has been added!";
pub const EVENT_DELETED_MESSAGE: &str = "The event has been deleted!";

/// Request to create a new event.
/// Fields may arrive as a JSON object, a form-encoded or multipart body, or query parameters.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Calendar date of the event, YYYY-MM-DD.
    #[schema(example = "2024-03-01")]
    pub date: Option<String>,
    /// Event label.
    #[schema(example = "Launch")]
    pub event: Option<String>,
}

impl CreateEventRequest {
    /// First occurrence of each field in decoded key/value pairs.
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            date: first_value(pairs, "date"),
            event: first_value(pairs, "event"),
        }
    }

    /// Fill fields missing here from `other`.
    fn or(self, other: CreateEventRequest) -> Self {
        Self {
            date: self.date.or(other.date),
            event: self.event.or(other.event),
        }
    }
}

/// Echo of a created event. The assigned id is not part of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedEventResponse {
    #[schema(example = "The event has been added!")]
    pub message: String,
    #[schema(example = "Launch")]
    pub event: String,
    #[schema(value_type = String, example = "2024-03-01")]
    pub date: NaiveDate,
}

/// Query parameters for event listing.
/// A repeated parameter keeps its first value.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListEventsQuery {
    /// First day of the range, YYYY-MM-DD (requires end_time)
    pub start_time: Option<String>,
    /// Last day of the range, YYYY-MM-DD (requires start_time)
    pub end_time: Option<String>,
}

impl ListEventsQuery {
    fn from_uri(uri: &Uri) -> Self {
        let pairs = query_pairs(uri);
        Self {
            start_time: first_value(&pairs, "start_time"),
            end_time: first_value(&pairs, "end_time"),
        }
    }
}

// ============================================
// App State and Routes
// ============================================

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/event", post(create_event).get(list_events))
        .route("/event/today", get(list_today_events))
        .route("/event/:event_id", get(get_event).delete(delete_event))
        .with_state(state)
}

// ============================================
// HTTP Handlers
// ============================================

/// POST /event - Create a new event
#[utoipa::path(
    post,
    path = "/event",
    request_body(
        content = CreateEventRequest,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json, multipart/form-data, or query parameters"
    ),
    responses(
        (status = 200, description = "Event created", body = CreatedEventResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<CreatedEventResponse>, ApiError> {
    let req = read_create_request(request).await;
    let new_event = validate_create_event(req.date.as_deref(), req.event.as_deref())?;

    let event = state.service.create(new_event).await.map_err(|e| {
        tracing::error!("Failed to create event: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(CreatedEventResponse {
        message: EVENT_ADDED_MESSAGE.to_string(),
        event: event.event,
        date: event.date,
    }))
}

/// GET /event - List events, optionally within an inclusive date range
#[utoipa::path(
    get,
    path = "/event",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 400, description = "Malformed range dates", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<Event>>, ApiError> {
    let query = ListEventsQuery::from_uri(&uri);
    let range = validate_date_range(query.start_time.as_deref(), query.end_time.as_deref())?;

    let events = state.service.list(range).await.map_err(|e| {
        tracing::error!("Failed to list events: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(events))
}

/// GET /event/today - List events dated today (server-local calendar date)
#[utoipa::path(
    get,
    path = "/event/today",
    responses(
        (status = 200, description = "Today's events", body = Vec<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_today_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let today = Local::now().date_naive();

    let events = state.service.list_on(today).await.map_err(|e| {
        tracing::error!("Failed to list today's events: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(events))
}

/// GET /event/{event_id} - Get event by ID
#[utoipa::path(
    get,
    path = "/event/{event_id}",
    params(
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event_id = parse_event_id(&event_id)?;

    let event = state
        .service
        .get(event_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get event: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(event))
}

/// DELETE /event/{event_id} - Delete event permanently
#[utoipa::path(
    delete,
    path = "/event/{event_id}",
    params(
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let event_id = parse_event_id(&event_id)?;

    let deleted = state.service.delete(event_id).await.map_err(|e| {
        tracing::error!("Failed to delete event: {}", e);
        ApiError::Internal
    })?;

    if deleted {
        Ok(Json(MessageResponse::new(EVENT_DELETED_MESSAGE)))
    } else {
        Err(ApiError::NotFound)
    }
}

// ============================================
// Request decoding
// ============================================

/// Event ids are positive integers; anything else cannot name an event.
fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::NotFound),
    }
}

/// Key/value pairs of the query string, in order. An undecodable query
/// string counts as empty.
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::debug!("Ignoring undecodable query string: {}", e);
            Vec::new()
        }
    }
}

fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

/// Collect create fields from the body (JSON, form, or multipart) and the
/// query string. Body values win over query values.
async fn read_create_request(request: Request) -> CreateEventRequest {
    let from_query = CreateEventRequest::from_pairs(&query_pairs(request.uri()));

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let from_body = if content_type.starts_with("application/json") {
        match Bytes::from_request(request, &()).await {
            Ok(body) => decode_json_fields(&body),
            Err(e) => {
                tracing::debug!("Ignoring unreadable JSON body: {}", e);
                CreateEventRequest::default()
            }
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        match Form::<Vec<(String, String)>>::from_request(request, &()).await {
            Ok(Form(pairs)) => CreateEventRequest::from_pairs(&pairs),
            Err(e) => {
                tracing::debug!("Ignoring undecodable form body: {}", e);
                CreateEventRequest::default()
            }
        }
    } else if content_type.starts_with("multipart/form-data") {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => decode_multipart_fields(multipart).await,
            Err(e) => {
                tracing::debug!("Ignoring unreadable multipart body: {}", e);
                CreateEventRequest::default()
            }
        }
    } else {
        CreateEventRequest::default()
    };

    from_body.or(from_query)
}

fn decode_json_fields(body: &[u8]) -> CreateEventRequest {
    if body.is_empty() {
        return CreateEventRequest::default();
    }
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Ignoring undecodable JSON body: {}", e);
            return CreateEventRequest::default();
        }
    };

    let field = |name: &str| match value.get(name) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };

    CreateEventRequest {
        date: field("date"),
        event: field("event"),
    }
}

/// Text parts named `date` or `event`; the first of each wins. A broken
/// stream keeps whatever was read before the break.
async fn decode_multipart_fields(mut multipart: Multipart) -> CreateEventRequest {
    let mut req = CreateEventRequest::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Stopping at malformed multipart field: {}", e);
                break;
            }
        };

        let slot = match field.name() {
            Some("date") => &mut req.date,
            Some("event") => &mut req.event,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }

        match field.text().await {
            Ok(text) => *slot = Some(text),
            Err(e) => {
                tracing::debug!("Stopping at unreadable multipart field: {}", e);
                break;
            }
        }
    }

    req
}

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, patch, post, put};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::cache::LocationFix;
use crate::error::AppError;
use crate::lifecycle::{RequestSummary, StatusView, TransactionReport};
use crate::models::history::HistoryEntry;
use crate::models::request::{GeoPoint, NewRequest, Request, RequestPatch, RequestStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/requests", post(create_request).get(list_requests))
        .route("/requests/summary", get(request_summary))
        .route("/requests/:id", get(get_request).patch(update_request))
        .route("/requests/:id/cancel", post(cancel_request))
        .route(
            "/requests/:id/accept",
            post(accept_request).get(accept_with_token),
        )
        .route(
            "/requests/:id/reject",
            post(reject_request).get(reject_with_token),
        )
        .route("/requests/:id/pickup", post(mark_picked_up))
        .route("/requests/:id/deliver", post(mark_delivered))
        .route(
            "/requests/:id/tracking",
            put(update_tracking).get(get_tracking),
        )
        .route("/requests/:id/status", get(request_status))
        .route("/requests/:id/history", get(request_history))
        .route("/carrier/location", patch(update_carrier_location))
        .route("/reports/transactions", get(transaction_report))
        .route("/users/:id/ban", post(ban_user))
}

/// Actor identity, established upstream by the API gateway.
fn actor(headers: &HeaderMap) -> Result<Uuid, AppError> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("missing x-user-id header".to_string()))?
        .parse()
        .map_err(|_| AppError::BadRequest("x-user-id must be a uuid".to_string()))
}

async fn create_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewRequest>,
) -> Result<Json<Request>, AppError> {
    let sender_id = actor(&headers)?;
    let request = state.lifecycle.create(payload, sender_id).await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
struct ListQuery {
    role: Option<String>,
    status: Option<RequestStatus>,
}

async fn list_requests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Request>>, AppError> {
    let user_id = actor(&headers)?;
    let requests = match query.role.as_deref() {
        Some("carrier") => state.lifecycle.requests_by_carrier(user_id, query.status)?,
        _ => state.lifecycle.requests_by_sender(user_id, query.status)?,
    };
    Ok(Json(requests))
}

async fn get_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Request>, AppError> {
    let requester_id = actor(&headers)?;
    Ok(Json(state.lifecycle.get(id, requester_id)?))
}

async fn update_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<RequestPatch>,
) -> Result<Json<Request>, AppError> {
    let requester_id = actor(&headers)?;
    let request = state.lifecycle.update(id, patch, requester_id).await?;
    Ok(Json(request))
}

async fn cancel_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Request>, AppError> {
    let requester_id = actor(&headers)?;
    let request = state.lifecycle.cancel(id, requester_id).await?;
    Ok(Json(request))
}

async fn accept_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Request>, AppError> {
    let carrier_id = actor(&headers)?;
    let request = state.lifecycle.accept(id, carrier_id).await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
struct TokenQuery {
    token: String,
}

async fn accept_with_token(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Request>, AppError> {
    let request = state.lifecycle.accept_with_token(id, &query.token).await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
struct RejectBody {
    reason: Option<String>,
}

async fn reject_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    body: Option<Json<RejectBody>>,
) -> Result<Json<Request>, AppError> {
    let carrier_id = actor(&headers)?;
    let reason = body.and_then(|Json(body)| body.reason);
    let request = state.lifecycle.reject(id, carrier_id, reason).await?;
    Ok(Json(request))
}

async fn reject_with_token(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Request>, AppError> {
    let request = state.lifecycle.reject_with_token(id, &query.token).await?;
    Ok(Json(request))
}

async fn mark_picked_up(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Request>, AppError> {
    let carrier_id = actor(&headers)?;
    let request = state.lifecycle.mark_picked_up(id, carrier_id).await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
struct DeliverBody {
    notes: Option<String>,
}

async fn mark_delivered(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    body: Option<Json<DeliverBody>>,
) -> Result<Json<Request>, AppError> {
    let carrier_id = actor(&headers)?;
    let notes = body.and_then(|Json(body)| body.notes);
    let request = state.lifecycle.mark_delivered(id, carrier_id, notes).await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
struct TrackingBody {
    location: GeoPoint,
}

async fn update_tracking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<TrackingBody>,
) -> Result<(), AppError> {
    let carrier_id = actor(&headers)?;
    state
        .lifecycle
        .update_tracking(id, body.location, carrier_id)
        .await
}

async fn get_tracking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<LocationFix>>, AppError> {
    let requester_id = actor(&headers)?;
    Ok(Json(state.lifecycle.get_tracking(id, requester_id)?))
}

async fn request_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusView>, AppError> {
    let requester_id = actor(&headers)?;
    Ok(Json(state.lifecycle.status(id, requester_id)?))
}

async fn request_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let requester_id = actor(&headers)?;
    Ok(Json(state.lifecycle.history(id, requester_id)?))
}

async fn request_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RequestSummary>, AppError> {
    let sender_id = actor(&headers)?;
    Ok(Json(state.lifecycle.summary(sender_id)?))
}

async fn update_carrier_location(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<TrackingBody>,
) -> Result<(), AppError> {
    let carrier_id = actor(&headers)?;
    state.lifecycle.update_carrier_location(carrier_id, body.location)
}

#[derive(Deserialize)]
struct ReportQuery {
    from: NaiveDate,
    to: NaiveDate,
}

async fn transaction_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<TransactionReport>, AppError> {
    let from = query
        .from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::BadRequest("invalid from date".to_string()))?
        .and_utc();
    let to = query
        .to
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::BadRequest("invalid to date".to_string()))?
        .and_utc();

    Ok(Json(state.lifecycle.transaction_report(from, to)))
}

#[derive(Deserialize)]
struct BanBody {
    reason: String,
}

async fn ban_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<BanBody>,
) -> Result<(), AppError> {
    state.lifecycle.ban_user(id, &body.reason).await
}

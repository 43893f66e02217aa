use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use models::concert::{parse_date, Concert, ConcertInput, ConcertPatch};
use service::catalog::{ConcertCatalog, ConcertRepository};
use service::errors::ServiceError;

use crate::errors::ApiError;

/// Shared application state: the catalog service owning the store handle,
/// created once at startup and injected into the router.
pub struct ServerState<R: ConcertRepository> {
    pub catalog: Arc<ConcertCatalog<R>>,
}

impl<R: ConcertRepository> Clone for ServerState<R> {
    fn clone(&self) -> Self {
        Self { catalog: Arc::clone(&self.catalog) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn list_concerts<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Concert>>, ApiError> {
    let start = parse_bound(q.start.as_deref())?;
    let end = parse_bound(q.end.as_deref())?;
    let venue = q.location.filter(|v| !v.is_empty());
    let concerts = state.catalog.list(venue, start, end).await?;
    Ok(Json(concerts))
}

pub async fn list_by_venue<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Path(venue): Path<String>,
) -> Result<Json<Vec<Concert>>, ApiError> {
    let concerts = state.catalog.list_by_venue(&venue).await?;
    Ok(Json(concerts))
}

pub async fn list_by_date<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<Concert>>, ApiError> {
    let start = parse_bound(q.start.as_deref())?;
    let end = parse_bound(q.end.as_deref())?;
    let concerts = state.catalog.list_by_date(start, end).await?;
    Ok(Json(concerts))
}

pub async fn create_concert<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Json(input): Json<ConcertInput>,
) -> Result<(StatusCode, Json<Concert>), ApiError> {
    let created = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_concert<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Path(id): Path<String>,
    Json(patch): Json<ConcertPatch>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_object_id(&id)?;
    state.catalog.update(id, patch).await?;
    Ok(Json(json!({ "message": "Concert updated successfully" })))
}

pub async fn delete_concert<R: ConcertRepository>(
    State(state): State<ServerState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_object_id(&id)?;
    state.catalog.delete(id).await?;
    Ok(Json(json!({ "message": "Concert marked as deleted" })))
}

// Id validation happens before any store call.
fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid concert ID format."))
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.filter(|s| !s.is_empty()) {
        Some(raw) => parse_date(raw)
            .map(Some)
            .map_err(|e| ApiError::from(ServiceError::from(e))),
        None => Ok(None),
    }
}

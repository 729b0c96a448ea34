// libs/availability-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AvailabilityError, DateKey};
use crate::services::AvailabilityStore;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub location: String,
    pub date: String,
}

pub async fn get_doctor(State(store): State<Arc<AvailabilityStore>>) -> Json<Value> {
    Json(json!({
        "doctor": store.doctor(),
        "locations": store.locations(),
        "visit_types": store.visit_types(),
    }))
}

pub async fn list_locations(State(store): State<Arc<AvailabilityStore>>) -> Json<Value> {
    Json(json!({
        "locations": store.locations(),
    }))
}

pub async fn list_dates(
    State(store): State<Arc<AvailabilityStore>>,
    Path(location): Path<String>,
) -> Result<Json<Value>, AppError> {
    let dates = store
        .list_dates(&location)
        .map_err(|e| match e {
            AvailabilityError::UnknownLocation(_) => AppError::NotFound(e.to_string()),
        })?;

    Ok(Json(json!({
        "location": location,
        "dates": dates,
    })))
}

pub async fn get_slots(
    State(store): State<Arc<AvailabilityStore>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let date = DateKey::parse(&query.date)
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", query.date)))?;

    let slots = store
        .slots(&query.location, &date)
        .map_err(|e| match e {
            AvailabilityError::UnknownLocation(_) => AppError::NotFound(e.to_string()),
        })?;

    Ok(Json(json!({
        "location": query.location,
        "date": date,
        "slots": slots,
    })))
}

// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use availability_cell::models::DateKey;
use shared_models::error::AppError;

use crate::models::{
    BookingError, BookingRecord, SelectDateRequest, SelectLocationRequest, SelectSlotRequest,
    SelectVisitTypeRequest, SessionError, SessionResponse,
};
use crate::services::SessionRegistry;

pub async fn create_session(
    State(registry): State<Arc<SessionRegistry>>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, selection) = registry.create().await;
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            selection,
        }),
    )
}

pub async fn get_session(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let selection = registry
        .selection(session_id)
        .await
        .map_err(map_session_error)?;
    Ok(Json(SessionResponse {
        session_id,
        selection,
    }))
}

pub async fn delete_session(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    registry
        .remove(session_id)
        .await
        .map_err(map_session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn select_location(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectLocationRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let selection = registry
        .select_location(session_id, &request.location)
        .await
        .map_err(map_session_error)?;
    Ok(Json(SessionResponse {
        session_id,
        selection,
    }))
}

pub async fn select_date(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectDateRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let date = DateKey::parse(&request.date)
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", request.date)))?;
    let selection = registry
        .select_date(session_id, date)
        .await
        .map_err(map_session_error)?;
    Ok(Json(SessionResponse {
        session_id,
        selection,
    }))
}

pub async fn select_visit_type(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectVisitTypeRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let selection = registry
        .select_visit_type(session_id, request.visit_type_id)
        .await
        .map_err(map_session_error)?;
    Ok(Json(SessionResponse {
        session_id,
        selection,
    }))
}

pub async fn select_slot(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectSlotRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let selection = registry
        .select_slot(session_id, request.slot_id)
        .await
        .map_err(map_session_error)?;
    Ok(Json(SessionResponse {
        session_id,
        selection,
    }))
}

pub async fn confirm_booking(
    State(registry): State<Arc<SessionRegistry>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<BookingRecord>, AppError> {
    let record = registry
        .confirm(session_id)
        .await
        .map_err(map_session_error)?;
    Ok(Json(record))
}

/// Each error kind keeps its own status so the presentation layer can map
/// it to a precise user-facing message.
fn map_session_error(err: SessionError) -> AppError {
    match err {
        SessionError::NotFound => AppError::NotFound(err.to_string()),
        SessionError::Booking(err) => match err {
            BookingError::UnknownLocation(_)
            | BookingError::UnknownVisitType(_)
            | BookingError::UnknownSlot(_) => AppError::NotFound(err.to_string()),
            BookingError::DateNotAvailable(_) | BookingError::IncompleteSelection => {
                AppError::BadRequest(err.to_string())
            }
            BookingError::SlotUnavailable(_) | BookingError::AlreadyConfirmed => {
                AppError::Conflict(err.to_string())
            }
        },
    }
}

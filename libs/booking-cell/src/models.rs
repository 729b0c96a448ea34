// libs/booking-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use availability_cell::models::DateKey;

// ==============================================================================
// SELECTION STATE
// ==============================================================================

/// The session's working selection. `location` is always a configured
/// location and `date` always has a bucket under it; both are re-defaulted
/// rather than left dangling when the location changes. Once `confirmed`
/// is set the selection is frozen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSelection {
    pub location: String,
    pub date: DateKey,
    pub slot_id: Option<i64>,
    pub visit_type_id: Option<i64>,
    pub confirmed: bool,
}

/// Produced at confirmation and handed to the notification collaborator.
/// Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub doctor_name: String,
    pub location_name: String,
    pub date_key: DateKey,
    pub time_label: String,
    pub visit_type_name: String,
    pub visit_type_duration: String,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectLocationRequest {
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectVisitTypeRequest {
    pub visit_type_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SelectSlotRequest {
    pub slot_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub selection: BookingSelection,
}

// ==============================================================================
// ERRORS
// ==============================================================================

/// Validation failures on a single transition. None are retryable without
/// new user input and none mutate the selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("No availability on {0}")]
    DateNotAvailable(DateKey),

    #[error("Unknown visit type: {0}")]
    UnknownVisitType(i64),

    #[error("Unknown slot: {0}")]
    UnknownSlot(i64),

    #[error("Slot {0} is not available")]
    SlotUnavailable(i64),

    #[error("Selection is missing a slot or visit type")]
    IncompleteSelection,

    #[error("Booking already confirmed")]
    AlreadyConfirmed,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error(transparent)]
    Booking(#[from] BookingError),
}

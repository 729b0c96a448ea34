// libs/availability-cell/src/models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// CORE AVAILABILITY MODELS
// ==============================================================================

/// Calendar date normalized to its ISO "YYYY-MM-DD" form, used as the
/// availability lookup key. Any in-memory date that formats to the same
/// string is the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Parse a user-supplied date string, normalizing it through chrono.
    /// Rejects anything that is not a valid calendar date.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Self::from)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bookable appointment slot. Slot ids are unique within a single
/// (location, date) bucket only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitType {
    pub id: i64,
    pub name: String,
    pub duration: String,
}

/// Static display data for the physician. No booking logic reads anything
/// here except the name, which ends up on the confirmation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub name: String,
    pub title: String,
    pub rating: f32,
    pub experience: String,
    pub education: Vec<String>,
    pub languages: Vec<String>,
    pub insurances: Vec<String>,
    pub specialties: Vec<String>,
    pub locations: Vec<String>,
    pub bio: String,
}

// ==============================================================================
// DATASET SCHEMA
// ==============================================================================

/// The static configuration loaded once at startup. Sequences carry the
/// configuration order; lookups must preserve it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDataset {
    pub doctor: DoctorProfile,
    pub locations: Vec<LocationAvailability>,
    pub visit_types: Vec<VisitType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAvailability {
    pub name: String,
    pub days: Vec<DayBucket>,
}

/// Slot bucket for one (location, date) pair. Never empty: a day with no
/// slots is simply absent from the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: DateKey,
    pub slots: Vec<TimeSlot>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
}

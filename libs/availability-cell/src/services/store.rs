// libs/availability-cell/src/services/store.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use tracing::debug;

use crate::models::{
    AvailabilityDataset, AvailabilityError, DateKey, DoctorProfile, LocationAvailability,
    TimeSlot, VisitType,
};

/// Immutable availability data: location -> date -> ordered slot bucket,
/// plus the visit-type catalog and the doctor's display profile. Built once
/// at startup and shared read-only across sessions.
pub struct AvailabilityStore {
    doctor: DoctorProfile,
    locations: Vec<LocationAvailability>,
    visit_types: Vec<VisitType>,
}

impl AvailabilityStore {
    /// Build a store from an already-parsed dataset, validating the
    /// structural invariants (non-empty, normalized dates, unique ids).
    pub fn from_dataset(dataset: AvailabilityDataset) -> Result<Self> {
        validate_dataset(&dataset)?;
        debug!(
            "Availability store loaded: {} locations, {} visit types",
            dataset.locations.len(),
            dataset.visit_types.len()
        );
        Ok(Self {
            doctor: dataset.doctor,
            locations: dataset.locations,
            visit_types: dataset.visit_types,
        })
    }

    /// Load and validate the dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read availability dataset at {}", path.display()))?;
        let dataset: AvailabilityDataset =
            serde_json::from_str(&raw).context("Failed to parse availability dataset")?;
        Self::from_dataset(dataset)
    }

    pub fn doctor(&self) -> &DoctorProfile {
        &self.doctor
    }

    pub fn visit_types(&self) -> &[VisitType] {
        &self.visit_types
    }

    pub fn find_visit_type(&self, id: i64) -> Option<&VisitType> {
        self.visit_types.iter().find(|vt| vt.id == id)
    }

    /// All configured locations, in configuration order.
    pub fn locations(&self) -> Vec<&str> {
        self.locations.iter().map(|loc| loc.name.as_str()).collect()
    }

    /// Every date with a slot bucket for the location, in configuration order.
    pub fn list_dates(&self, location: &str) -> Result<Vec<&DateKey>, AvailabilityError> {
        let location = self.location(location)?;
        Ok(location.days.iter().map(|day| &day.date).collect())
    }

    /// The configured slot bucket, order preserved verbatim. A valid
    /// location with no bucket for the date yields an empty slice; only an
    /// unknown location is an error.
    pub fn slots(&self, location: &str, date: &DateKey) -> Result<&[TimeSlot], AvailabilityError> {
        let location = self.location(location)?;
        Ok(location
            .days
            .iter()
            .find(|day| day.date == *date)
            .map(|day| day.slots.as_slice())
            .unwrap_or(&[]))
    }

    /// True iff the date has a bucket under the location. Derived from the
    /// same day list as `list_dates`.
    pub fn is_date_available(&self, location: &str, date: &DateKey) -> bool {
        self.location(location)
            .map(|loc| loc.days.iter().any(|day| day.date == *date))
            .unwrap_or(false)
    }

    pub fn find_slot(
        &self,
        location: &str,
        date: &DateKey,
        slot_id: i64,
    ) -> Result<Option<&TimeSlot>, AvailabilityError> {
        Ok(self
            .slots(location, date)?
            .iter()
            .find(|slot| slot.id == slot_id))
    }

    /// The earliest configured date for the location, used as the default
    /// whenever a session switches to it.
    pub fn default_date(&self, location: &str) -> Result<DateKey, AvailabilityError> {
        let location = self.location(location)?;
        // days are non-empty by construction
        Ok(location.days[0].date.clone())
    }

    /// First configured location and its first configured date: the
    /// deterministic starting selection for a fresh session.
    pub fn default_selection(&self) -> (String, DateKey) {
        // locations and their day lists are non-empty by construction
        let first = &self.locations[0];
        (first.name.clone(), first.days[0].date.clone())
    }

    fn location(&self, name: &str) -> Result<&LocationAvailability, AvailabilityError> {
        self.locations
            .iter()
            .find(|loc| loc.name == name)
            .ok_or_else(|| AvailabilityError::UnknownLocation(name.to_string()))
    }
}

fn validate_dataset(dataset: &AvailabilityDataset) -> Result<()> {
    ensure!(
        !dataset.locations.is_empty(),
        "Availability dataset has no locations"
    );
    ensure!(
        !dataset.visit_types.is_empty(),
        "Availability dataset has no visit types"
    );

    let mut location_names = HashSet::new();
    for location in &dataset.locations {
        ensure!(
            location_names.insert(location.name.as_str()),
            "Duplicate location {:?}",
            location.name
        );
        ensure!(
            !location.days.is_empty(),
            "Location {:?} has no availability",
            location.name
        );

        let mut dates = HashSet::new();
        for day in &location.days {
            let normalized = DateKey::parse(day.date.as_str()).with_context(|| {
                format!(
                    "Invalid date {:?} under location {:?}",
                    day.date, location.name
                )
            })?;
            ensure!(
                normalized == day.date,
                "Date {:?} under location {:?} is not in normalized YYYY-MM-DD form",
                day.date,
                location.name
            );
            ensure!(
                dates.insert(day.date.as_str()),
                "Duplicate date {} under location {:?}",
                day.date,
                location.name
            );
            ensure!(
                !day.slots.is_empty(),
                "Empty slot bucket for {:?} on {}",
                location.name,
                day.date
            );

            let mut slot_ids = HashSet::new();
            for slot in &day.slots {
                ensure!(
                    slot_ids.insert(slot.id),
                    "Duplicate slot id {} for {:?} on {}",
                    slot.id,
                    location.name,
                    day.date
                );
            }
        }
    }

    let mut visit_type_ids = HashSet::new();
    for visit_type in &dataset.visit_types {
        ensure!(
            visit_type_ids.insert(visit_type.id),
            "Duplicate visit type id {}",
            visit_type.id
        );
    }

    Ok(())
}

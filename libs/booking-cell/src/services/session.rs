// libs/booking-cell/src/services/session.rs
use std::sync::Arc;

use tracing::{debug, info};

use availability_cell::models::{AvailabilityError, DateKey};
use availability_cell::services::AvailabilityStore;

use crate::models::{BookingError, BookingRecord, BookingSelection};

impl From<AvailabilityError> for BookingError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::UnknownLocation(name) => BookingError::UnknownLocation(name),
        }
    }
}

/// One patient's in-progress booking. Owns the mutable selection and is the
/// only thing allowed to change it; every transition either fully applies
/// or leaves the selection untouched.
pub struct BookingSession {
    store: Arc<AvailabilityStore>,
    selection: BookingSelection,
}

impl BookingSession {
    /// Fresh session: first configured location, its earliest configured
    /// date, nothing else chosen.
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        let (location, date) = store.default_selection();
        Self {
            store,
            selection: BookingSelection {
                location,
                date,
                slot_id: None,
                visit_type_id: None,
                confirmed: false,
            },
        }
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    /// Switch location. The date is reset to the new location's earliest
    /// configured date and any chosen slot is cleared: slot ids are scoped
    /// to a (location, date) bucket and must never be carried over.
    pub fn select_location(&mut self, location: &str) -> Result<(), BookingError> {
        self.ensure_selecting()?;
        let date = self.store.default_date(location)?;

        debug!("Selected location {:?}, date reset to {}", location, date);
        self.selection.location = location.to_string();
        self.selection.date = date;
        self.selection.slot_id = None;
        Ok(())
    }

    /// Switch date within the current location. Clears any chosen slot.
    pub fn select_date(&mut self, date: DateKey) -> Result<(), BookingError> {
        self.ensure_selecting()?;
        if !self.store.is_date_available(&self.selection.location, &date) {
            return Err(BookingError::DateNotAvailable(date));
        }

        debug!("Selected date {}", date);
        self.selection.date = date;
        self.selection.slot_id = None;
        Ok(())
    }

    /// Visit type is an independent axis; it never affects the chosen slot.
    pub fn select_visit_type(&mut self, visit_type_id: i64) -> Result<(), BookingError> {
        self.ensure_selecting()?;
        if self.store.find_visit_type(visit_type_id).is_none() {
            return Err(BookingError::UnknownVisitType(visit_type_id));
        }

        self.selection.visit_type_id = Some(visit_type_id);
        Ok(())
    }

    /// Choose a slot from the current (location, date) bucket. A slot that
    /// exists but is flagged unavailable is rejected here, not just at
    /// confirmation, so the UI can never carry one forward.
    pub fn select_slot(&mut self, slot_id: i64) -> Result<(), BookingError> {
        self.ensure_selecting()?;
        let slot = self
            .store
            .find_slot(&self.selection.location, &self.selection.date, slot_id)?
            .ok_or(BookingError::UnknownSlot(slot_id))?;
        if !slot.available {
            return Err(BookingError::SlotUnavailable(slot_id));
        }

        self.selection.slot_id = Some(slot_id);
        Ok(())
    }

    /// Commit the selection. The slot's availability is re-validated against
    /// the store rather than trusted from the selection; in a live system
    /// this is the serialization point for slot contention.
    pub fn confirm(&mut self) -> Result<BookingRecord, BookingError> {
        self.ensure_selecting()?;
        let (slot_id, visit_type_id) = match (self.selection.slot_id, self.selection.visit_type_id)
        {
            (Some(slot_id), Some(visit_type_id)) => (slot_id, visit_type_id),
            _ => return Err(BookingError::IncompleteSelection),
        };

        let slot = self
            .store
            .find_slot(&self.selection.location, &self.selection.date, slot_id)?
            .ok_or(BookingError::UnknownSlot(slot_id))?;
        if !slot.available {
            return Err(BookingError::SlotUnavailable(slot_id));
        }
        let visit_type = self
            .store
            .find_visit_type(visit_type_id)
            .ok_or(BookingError::UnknownVisitType(visit_type_id))?;

        let record = BookingRecord {
            doctor_name: self.store.doctor().name.clone(),
            location_name: self.selection.location.clone(),
            date_key: self.selection.date.clone(),
            time_label: slot.time.clone(),
            visit_type_name: visit_type.name.clone(),
            visit_type_duration: visit_type.duration.clone(),
        };

        self.selection.confirmed = true;
        info!(
            "Booking confirmed: {} at {} on {} ({})",
            record.doctor_name, record.location_name, record.date_key, record.visit_type_name
        );

        Ok(record)
    }

    fn ensure_selecting(&self) -> Result<(), BookingError> {
        if self.selection.confirmed {
            return Err(BookingError::AlreadyConfirmed);
        }
        Ok(())
    }
}

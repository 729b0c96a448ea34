// libs/booking-cell/src/services/registry.rs
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use availability_cell::models::DateKey;
use availability_cell::services::AvailabilityStore;

use crate::models::{BookingRecord, BookingSelection, SessionError};
use crate::services::session::BookingSession;

/// Session store for the HTTP surface. Each session belongs to one caller;
/// the write lock makes every transition run to completion before the next
/// one for the same session is observed.
pub struct SessionRegistry {
    store: Arc<AvailabilityStore>,
    sessions: RwLock<HashMap<Uuid, BookingSession>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> (Uuid, BookingSelection) {
        let session = BookingSession::new(Arc::clone(&self.store));
        let selection = session.selection().clone();
        let session_id = Uuid::new_v4();

        self.sessions.write().await.insert(session_id, session);
        debug!("Created booking session {}", session_id);
        (session_id, selection)
    }

    pub async fn selection(&self, session_id: Uuid) -> Result<BookingSelection, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&session_id).ok_or(SessionError::NotFound)?;
        Ok(session.selection().clone())
    }

    /// Abandoning a Selecting-state session has no side effects to undo.
    pub async fn remove(&self, session_id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| debug!("Removed booking session {}", session_id))
            .ok_or(SessionError::NotFound)
    }

    pub async fn select_location(
        &self,
        session_id: Uuid,
        location: &str,
    ) -> Result<BookingSelection, SessionError> {
        self.apply(session_id, |session| session.select_location(location))
            .await
    }

    pub async fn select_date(
        &self,
        session_id: Uuid,
        date: DateKey,
    ) -> Result<BookingSelection, SessionError> {
        self.apply(session_id, |session| session.select_date(date))
            .await
    }

    pub async fn select_visit_type(
        &self,
        session_id: Uuid,
        visit_type_id: i64,
    ) -> Result<BookingSelection, SessionError> {
        self.apply(session_id, |session| session.select_visit_type(visit_type_id))
            .await
    }

    pub async fn select_slot(
        &self,
        session_id: Uuid,
        slot_id: i64,
    ) -> Result<BookingSelection, SessionError> {
        self.apply(session_id, |session| session.select_slot(slot_id))
            .await
    }

    pub async fn confirm(&self, session_id: Uuid) -> Result<BookingRecord, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&session_id).ok_or(SessionError::NotFound)?;
        Ok(session.confirm()?)
    }

    async fn apply<F>(&self, session_id: Uuid, transition: F) -> Result<BookingSelection, SessionError>
    where
        F: FnOnce(&mut BookingSession) -> Result<(), crate::models::BookingError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&session_id).ok_or(SessionError::NotFound)?;
        transition(session)?;
        Ok(session.selection().clone())
    }
}

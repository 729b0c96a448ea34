pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export the session machinery and core models for external use
pub use models::{BookingError, BookingRecord, BookingSelection, SessionError};
pub use services::{BookingSession, SessionRegistry};

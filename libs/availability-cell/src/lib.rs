pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export the store and core models for external use
pub use models::{
    AvailabilityDataset, AvailabilityError, DateKey, DoctorProfile, TimeSlot, VisitType,
};
pub use services::AvailabilityStore;

pub mod store;

pub use store::AvailabilityStore;

pub mod session;
pub mod registry;

pub use session::BookingSession;
pub use registry::SessionRegistry;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::AvailabilityStore;

/// Read-only query surface the rendering layer consumes. No authentication:
/// the dataset is public display data.
pub fn availability_routes(store: Arc<AvailabilityStore>) -> Router {
    Router::new()
        .route("/doctor", get(handlers::get_doctor))
        .route("/locations", get(handlers::list_locations))
        .route("/locations/{location}/dates", get(handlers::list_dates))
        .route("/slots", get(handlers::get_slots))
        .with_state(store)
}

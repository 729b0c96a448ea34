use std::sync::Arc;

use axum::{routing::get, Router};

use availability_cell::router::availability_routes;
use availability_cell::services::AvailabilityStore;
use booking_cell::router::booking_routes;
use booking_cell::services::SessionRegistry;

pub fn create_router(store: Arc<AvailabilityStore>, registry: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/availability", availability_routes(store))
        .nest("/booking", booking_routes(registry))
}

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::services::SessionRegistry;

pub fn booking_routes(registry: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{session_id}/location", put(handlers::select_location))
        .route("/sessions/{session_id}/date", put(handlers::select_date))
        .route("/sessions/{session_id}/visit-type", put(handlers::select_visit_type))
        .route("/sessions/{session_id}/slot", put(handlers::select_slot))
        .route("/sessions/{session_id}/confirm", post(handlers::confirm_booking))
        .with_state(registry)
}

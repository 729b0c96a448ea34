use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use availability_cell::models::AvailabilityDataset;
use availability_cell::services::AvailabilityStore;
use booking_cell::router::booking_routes;
use booking_cell::services::SessionRegistry;

fn create_test_app() -> Router {
    let dataset: AvailabilityDataset = serde_json::from_value(json!({
        "doctor": {
            "name": "Dr. Michael Anderson",
            "title": "Cardiologist",
            "rating": 4.8,
            "experience": "20+ years",
            "education": ["MD - Harvard Medical School"],
            "languages": ["English"],
            "insurances": ["Aetna"],
            "specialties": ["General Cardiology"],
            "locations": ["Main Clinic - 123 Medical Center Drive"],
            "bio": "Board-certified cardiologist."
        },
        "locations": [
            {
                "name": "Main Clinic",
                "days": [
                    {
                        "date": "2024-11-17",
                        "slots": [
                            { "id": 1, "time": "09:00 AM", "available": true },
                            { "id": 3, "time": "11:00 AM", "available": false }
                        ]
                    }
                ]
            },
            {
                "name": "Downtown Office",
                "days": [
                    {
                        "date": "2024-11-18",
                        "slots": [
                            { "id": 14, "time": "10:30 AM", "available": true }
                        ]
                    }
                ]
            }
        ],
        "visit_types": [
            { "id": 2, "name": "Follow-up Visit", "duration": "30 min" }
        ]
    }))
    .unwrap();

    let store = Arc::new(AvailabilityStore::from_dataset(dataset).unwrap());
    booking_routes(Arc::new(SessionRegistry::new(store)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_session_defaults() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/sessions", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["selection"]["location"], "Main Clinic");
    assert_eq!(body["selection"]["date"], "2024-11-17");
    assert_eq!(body["selection"]["slot_id"], Value::Null);
    assert_eq!(body["selection"]["confirmed"], false);
}

#[tokio::test]
async fn test_full_booking_flow() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/slot", id),
        Some(json!({ "slot_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selection"]["slot_id"], 1);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/visit-type", id),
        Some(json!({ "visit_type_id": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, record) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/confirm", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["doctor_name"], "Dr. Michael Anderson");
    assert_eq!(record["location_name"], "Main Clinic");
    assert_eq!(record["date_key"], "2024-11-17");
    assert_eq!(record["time_label"], "09:00 AM");
    assert_eq!(record["visit_type_name"], "Follow-up Visit");
    assert_eq!(record["visit_type_duration"], "30 min");

    // session is terminal now
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/slot", id),
        Some(json!({ "slot_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("confirmed"));
}

#[tokio::test]
async fn test_select_location_resets_date_and_slot() {
    let app = create_test_app();
    let id = create_session(&app).await;

    send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/slot", id),
        Some(json!({ "slot_id": 1 })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/location", id),
        Some(json!({ "location": "Downtown Office" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selection"]["location"], "Downtown Office");
    assert_eq!(body["selection"]["date"], "2024-11-18");
    assert_eq!(body["selection"]["slot_id"], Value::Null);
}

#[tokio::test]
async fn test_select_unavailable_slot_conflict() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/slot", id),
        Some(json!({ "slot_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("not available"));

    // selection untouched
    let (_, body) = send(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(body["selection"]["slot_id"], Value::Null);
}

#[tokio::test]
async fn test_select_date_without_bucket_bad_request() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/date", id),
        Some(json!({ "date": "2024-12-25" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_date_malformed_bad_request() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/date", id),
        Some(json!({ "date": "next tuesday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid date"));
}

#[tokio::test]
async fn test_confirm_incomplete_selection() {
    let app = create_test_app();
    let id = create_session(&app).await;

    send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/slot", id),
        Some(json!({ "slot_id": 1 })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/sessions/{}/confirm", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_unknown_session_not_found() {
    let app = create_test_app();
    let id = uuid::Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/location", id),
        Some(json!({ "location": "Main Clinic" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_visit_type_not_found() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/visit-type", id),
        Some(json!({ "visit_type_id": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_app();
    let id = create_session(&app).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = create_test_app();
    let first = create_session(&app).await;
    let second = create_session(&app).await;

    send(
        &app,
        Method::PUT,
        &format!("/sessions/{}/location", first),
        Some(json!({ "location": "Downtown Office" })),
    )
    .await;

    let (_, body) = send(&app, Method::GET, &format!("/sessions/{}", second), None).await;
    assert_eq!(body["selection"]["location"], "Main Clinic");
}

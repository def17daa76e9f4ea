use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::pricing::router::suggestions_handler;

fn post_json(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn suggestions_route_returns_ranked_payload() {
    let body = serde_json::to_value(request()).expect("request serializes");
    let response = router()
        .oneshot(post_json("/api/v1/pricing/suggestions", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["northStarPrice"], json!(1925.0));

    let suggestions = payload["suggestions"].as_array().expect("suggestions array");
    assert_eq!(suggestions.len(), 4);
    assert_eq!(suggestions[0]["termMonths"], json!(3));
    assert_eq!(suggestions[0]["isAllowed"], json!(false));
    assert_eq!(suggestions[0]["riskLevel"], json!("over"));
    assert_eq!(suggestions[1]["expirationMonth"], json!("April"));
    assert!(payload.get("warnings").is_none());
}

#[tokio::test]
async fn suggestions_route_accepts_front_end_shaped_json() {
    let body = json!({
        "unitType": { "typeName": "Studio", "baseRent": 1200, "minRent": 1100, "maxRent": 1400 },
        "moveInDate": "2025-10-31",
        "currentOccupancy": 93,
        "marketComps": [
            { "propertyName": "Elm Court", "rentByUnitType": { "Studio": 1300 }, "weight": 100 }
        ],
        "occupancyThresholds": [
            { "thresholdPercent": 90, "adjustment": 25, "kind": "dollar" }
        ],
        "leaseTermAdjustments": [
            { "termMonths": 4, "adjustment": 0, "kind": "dollar" }
        ],
        "expirationAllocation": []
    });

    let response = router()
        .oneshot(post_json("/api/v1/pricing/suggestions", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let first = &payload["suggestions"][0];
    assert_eq!(first["suggestedRent"], json!(1275.0));
    assert_eq!(first["expirationDate"], json!("2026-02-28"));
    assert_eq!(first["expirationMonth"], json!("February"));
    assert_eq!(payload["warnings"][0]["kind"], json!("configurationGap"));
}

#[tokio::test]
async fn suggestions_handler_reports_validation_field() {
    let mut invalid = request();
    invalid.current_occupancy = 120.0;

    let response = suggestions_handler(State(Arc::new(engine())), Ok(axum::Json(invalid)))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("currentOccupancy"));
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("outside 0-100"));
}

#[tokio::test]
async fn malformed_body_returns_json_error() {
    let request = axum::http::Request::post("/api/v1/pricing/suggestions")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"unitType\": "))
        .expect("request builds");
    let response = router().oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("invalid request body"));
    assert!(payload.get("field").is_none());
}

#[tokio::test]
async fn expiration_curve_route_returns_summary() {
    let body = json!({ "expirationAllocation": allocations() });
    let response = router()
        .oneshot(post_json("/api/v1/pricing/expiration-curve", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["monthsOver"], json!(1));
    assert_eq!(payload["entries"].as_array().map(Vec::len), Some(12));
    assert_eq!(payload["entries"][0]["month"], json!("January"));
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Router-level tests for the endpoints that run without upstream access:
//! health, API info, the 4D record store and request validation.

use acc_4d_server::{config::Config, router, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        port: 0,
        aps_client_id: "test-client".into(),
        aps_client_secret: "test-secret".into(),
        aps_base_url: "http://127.0.0.1:9".into(),
        stability_api_key: None,
        stability_base_url: "http://127.0.0.1:9".into(),
        request_timeout_secs: 5,
        token_refresh_lead_secs: 300,
        max_body_mb: 4,
    }
}

fn app() -> Router {
    router(AppState::new(test_config()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_credentials_and_count() {
    let response = app().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["hasCredentials"], true);
    assert_eq!(body["hasAIKey"], false);
    assert_eq!(body["database4DCount"], 0);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let response = app().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["service"], "acc-4d-server");
    assert!(body["endpoints"].as_array().unwrap().len() >= 10);
}

#[tokio::test]
async fn schedule_record_crud_cycle() {
    let app = app();

    // Save
    let save = json_request(
        "POST",
        "/api/4d/properties",
        json!({
            "elementId": 4242,
            "properties": {
                "elementName": "Wall-01",
                "scheduledStartDate": "2024-01-01",
                "scheduledEndDate": "2024-01-31",
                "status": "in-progress",
                "progress": 60,
                "contractor": "FrameCo",
            },
        }),
    );
    let response = app.clone().oneshot(save).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let record_id = body["recordId"].as_str().unwrap().to_string();
    assert!(record_id.starts_with("4D-4242-"));

    // Get
    let response = app
        .clone()
        .oneshot(get_request("/api/4d/properties/4242"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["elementId"], 4242);
    assert_eq!(body["data"]["status"], "in-progress");
    assert_eq!(body["data"]["recordId"], record_id.as_str());
    assert!(body["data"]["lastUpdated"].is_string());

    // List (project id is accepted but not a partition key)
    let response = app
        .clone()
        .oneshot(get_request("/api/4d/project/any-project/properties"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["elementId"], 4242);

    // Delete
    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/4d/properties/4242")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone
    let response = app
        .oneshot(get_request("/api/4d/properties/4242"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_overwrites_prior_record() {
    let app = app();
    for progress in [10, 90] {
        let save = json_request(
            "POST",
            "/api/4d/properties",
            json!({
                "elementId": 7,
                "properties": { "elementName": "Beam", "progress": progress },
            }),
        );
        let response = app.clone().oneshot(save).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_request("/api/4d/properties/7"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["progress"], 90);
}

#[tokio::test]
async fn save_without_element_id_is_bad_request() {
    let save = json_request(
        "POST",
        "/api/4d/properties",
        json!({ "properties": { "elementName": "Beam" } }),
    );
    let response = app().oneshot(save).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn save_without_properties_is_bad_request() {
    let save = json_request("POST", "/api/4d/properties", json!({ "elementId": 1 }));
    let response = app().oneshot(save).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_record_is_not_found() {
    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/4d/properties/999")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn translate_without_urn_is_bad_request() {
    let request = json_request("POST", "/api/modelderivative/translate", json!({}));
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn convert_to_ifc_without_urn_is_bad_request() {
    let request = json_request("POST", "/api/modelderivative/convert-to-ifc", json!({}));
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn render_without_prompt_is_bad_request() {
    let request = json_request("POST", "/api/ai/render", json!({ "image": "aGVsbG8=" }));
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn render_without_key_is_unavailable() {
    let request = json_request(
        "POST",
        "/api/ai/render",
        json!({ "image": "aGVsbG8=", "prompt": "photorealistic concrete" }),
    );
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "RENDER_UNAVAILABLE");
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! Every request here is rejected before any database access, so they run
//! without the Firestore emulator.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;

mod common;

async fn error_code(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["error"].as_str().unwrap_or_default().to_string()
}

async fn authed_get(uri: &str) -> Response {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn post_json(uri: &str, body: &str) -> Response {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_invalid_date_format() {
    let response = authed_get("/api/meals?startDate=invalid-date").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inverted_date_range() {
    let response = authed_get("/api/workouts?startDate=2024-02-01&endDate=2024-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_meal_type_filter() {
    let response = authed_get("/api/meals?mealType=brunch").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_workout_type_filter() {
    let response = authed_get("/api/workouts?type=juggling").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let response = post_json(
        "/api/auth/register",
        r#"{"email":"not-an-email","password":"password123","name":"John"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "validation_error");
}

#[tokio::test]
async fn test_register_short_password() {
    let response = post_json(
        "/api/auth/register",
        r#"{"email":"john@example.com","password":"12345","name":"John"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let response = post_json("/api/meals", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "bad_request");
}

#[tokio::test]
async fn test_meal_missing_required_fields() {
    let response = post_json("/api/meals", r#"{"name":"Oatmeal"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meal_negative_calories() {
    let response = post_json(
        "/api/meals",
        r#"{"name":"Oatmeal","mealType":"breakfast","calories":-5,"protein":10,"carbs":50,"fats":5}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "validation_error");
}

#[tokio::test]
async fn test_workout_duration_out_of_range() {
    let response = post_json(
        "/api/workouts",
        r#"{"name":"Run","type":"cardio","duration":0,"caloriesBurned":300}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

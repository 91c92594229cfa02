// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitsync::error::AppError;
use fitsync::services::NutritionError;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn test_status_mapping() {
    assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::InvalidCredentials.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        AppError::NotFound("Meal not found".to_string()).status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::Conflict("Email already registered".to_string()).status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::IncompleteProfile(NutritionError::MissingMetric("weight")).status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AppError::Database("unavailable".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_incomplete_profile_body() {
    let (status, json) =
        body_json(AppError::IncompleteProfile(NutritionError::MissingMetric("height"))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "incomplete_profile");
    assert!(json["details"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_database_error_details_hidden() {
    let (status, json) = body_json(AppError::Database("connection refused".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "database_error");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_forbidden_has_no_details() {
    let (status, json) = body_json(AppError::Forbidden).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json, serde_json::json!({"error": "forbidden"}));
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod meals;
pub mod recommendations;
pub mod workouts;

use crate::error::{AppError, Result};
use crate::middleware::{require_admin, require_auth};
use crate::time_utils::{parse_date, DayBound};
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub meals: &'static str,
    pub workouts: &'static str,
    pub recommendations: &'static str,
    pub admin: &'static str,
}

/// API root: name, version and where each resource lives.
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to FitSync API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            auth: "/api/auth",
            meals: "/api/meals",
            workouts: "/api/workouts",
            recommendations: "/api/recommendations",
            admin: "/api/admin",
        },
    })
}

/// Date-range query parameters shared by the log listings and summaries.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parsed, inclusive date bounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRangeParams {
    /// Parse both bounds; a bare `YYYY-MM-DD` end date covers that whole day.
    pub fn parse(&self) -> Result<DateRange> {
        let bound = |raw: &Option<String>, name: &str, which: DayBound| {
            raw.as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    parse_date(s, which)
                        .ok_or_else(|| AppError::BadRequest(format!("Invalid {}: {}", name, s)))
                })
                .transpose()
        };

        let range = DateRange {
            start: bound(&self.start_date, "startDate", DayBound::Start)?,
            end: bound(&self.end_date, "endDate", DayBound::End)?,
        };

        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(AppError::BadRequest(
                    "startDate must not be after endDate".to_string(),
                ));
            }
        }

        Ok(range)
    }
}

/// Body returned by delete endpoints.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .merge(auth::public_routes());

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(auth::profile_routes())
        .merge(meals::routes())
        .merge(workouts::routes())
        .merge(recommendations::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes: the auth layer is added last so it runs first
    let admin_routes = admin::routes()
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .fallback(|| async { AppError::NotFound("Route not found".to_string()) })
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, end: Option<&str>) -> DateRangeParams {
        DateRangeParams {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn test_date_range_end_date_covers_whole_day() {
        let range = params(Some("2024-01-15"), Some("2024-01-15"))
            .parse()
            .unwrap();
        let start = range.start.unwrap();
        let end = range.end.unwrap();

        assert_eq!(start.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert!(end > start);
        assert_eq!(end.date_naive(), start.date_naive());
    }

    #[test]
    fn test_date_range_empty_and_absent_are_unbounded() {
        assert_eq!(params(None, Some("")).parse().unwrap(), DateRange::default());
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        assert!(matches!(
            params(Some("last week"), None).parse(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            params(Some("2024-02-01"), Some("2024-01-01")).parse(),
            Err(AppError::BadRequest(_))
        ));
    }
}

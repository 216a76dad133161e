//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::Router;

use bookbot::api::AppState;
use bookbot::api::app;
use bookbot::core::AppConfig;

/// Config pointing the calendar client at `gcal_api_url`, with the same
/// fixed timezone the unit tests use.
pub fn test_config(gcal_api_url: &str) -> AppConfig {
    AppConfig {
        timezone: "Asia/Kolkata".parse().expect("known timezone"),
        calendar_id: String::from("primary"),
        google_api_key: String::from("test-api-key"),
        gcal_api_url: gcal_api_url.to_string(),
    }
}

/// Creates a test application router backed by the given calendar API URL.
pub fn test_app(gcal_api_url: &str) -> Router {
    let app_state = AppState::new(test_config(gcal_api_url));
    app(Arc::new(RwLock::new(app_state)))
}

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    listings: ListingHealth,
}

#[derive(Serialize)]
pub struct ListingHealth {
    status: String,
    whitelist: usize,
    blacklist: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Checks that the listing file is readable (a file that does not exist
/// yet counts as an empty store). Returns 200 OK when healthy,
/// 503 Service Unavailable otherwise.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let listings = state.listings.lock().await;

    match listings.load_or_default() {
        Ok(store) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                listings: ListingHealth {
                    status: "ok".to_string(),
                    whitelist: store.whitelist.len(),
                    blacklist: store.blacklist.len(),
                    error: None,
                },
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                listings: ListingHealth {
                    status: "error".to_string(),
                    whitelist: 0,
                    blacklist: 0,
                    error: Some(e.to_string()),
                },
            }),
        ),
    }
}

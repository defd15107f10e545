//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use extraction::ListingFile;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::server::routes::{blacklist_handler, health_handler, index_handler, listings_handler};

/// Shared application state.
///
/// The listing file has a single-writer contract; every handler that
/// touches it goes through this lock, so a blacklist mutation never races
/// another load-modify-save sequence.
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<Mutex<ListingFile>>,
}

/// Build the application router.
pub fn build_app(listings: ListingFile) -> Router {
    let state = AppState {
        listings: Arc::new(Mutex::new(listings)),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/listings", get(listings_handler))
        .route("/blacklist", post(blacklist_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

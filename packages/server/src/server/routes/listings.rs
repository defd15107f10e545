//! Whitelist view and blacklist mutation.

use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct ListingsResponse {
    whitelist: Vec<String>,
    count: usize,
}

#[derive(Deserialize)]
pub struct BlacklistRequest {
    url: String,
}

#[derive(Serialize)]
pub struct BlacklistResponse {
    whitelist_count: usize,
    blacklist_count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn store_unavailable(e: impl std::fmt::Display) -> RouteError {
    warn!(error = %e, "listing store unavailable");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// The whitelist as JSON.
pub async fn listings_handler(
    State(state): State<AppState>,
) -> Result<Json<ListingsResponse>, RouteError> {
    let listings = state.listings.lock().await;
    let store = listings.load_or_default().map_err(store_unavailable)?;

    let whitelist: Vec<String> = store.whitelist.into_iter().collect();
    Ok(Json(ListingsResponse {
        count: whitelist.len(),
        whitelist,
    }))
}

/// The whitelist as a browsable page with one suppress button per link.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, RouteError> {
    let listings = state.listings.lock().await;
    let store = listings.load_or_default().map_err(store_unavailable)?;

    let mut items = String::new();
    for link in &store.whitelist {
        let safe = escape_html(link);
        items.push_str(&format!(
            "      <li><a href=\"{safe}\" target=\"_blank\" rel=\"noopener\">{safe}</a> \
             <button class=\"blacklist\" data-url=\"{safe}\">ausblenden</button></li>\n"
        ));
    }

    Ok(Html(format!(
        r#"<!doctype html>
<html lang="de">
  <head>
    <meta charset="utf-8">
    <title>Wohnungen</title>
  </head>
  <body>
    <h1>Wohnungen ({count})</h1>
    <ul>
{items}    </ul>
    <script>
      document.addEventListener('click', async (event) => {{
        if (!event.target.matches('button.blacklist')) return;
        await fetch('/blacklist', {{
          method: 'POST',
          headers: {{ 'Content-Type': 'application/json' }},
          body: JSON.stringify({{ url: event.target.dataset.url }}),
        }});
        location.reload();
      }});
    </script>
  </body>
</html>
"#,
        count = store.whitelist.len(),
    )))
}

/// Permanently suppress one link.
///
/// Removes it from the whitelist (absence is a no-op) and records it in
/// the blacklist so no future scrape pass re-admits it. Persists before
/// answering.
pub async fn blacklist_handler(
    State(state): State<AppState>,
    Json(request): Json<BlacklistRequest>,
) -> Result<Json<BlacklistResponse>, RouteError> {
    let listings = state.listings.lock().await;
    let mut store = listings.load_or_default().map_err(store_unavailable)?;

    store.promote_to_blacklist(&request.url);
    listings.save(&store).map_err(store_unavailable)?;

    info!(url = %request.url, "link blacklisted");
    Ok(Json(BlacklistResponse {
        whitelist_count: store.whitelist.len(),
        blacklist_count: store.blacklist.len(),
    }))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

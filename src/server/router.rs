//! Route table for the invoice pages and form actions

use super::handlers::{
    AppState, create_invoice, delete_invoice, get_invoice, health_check, list_invoices, login,
    update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application routes under the configured listing path
///
/// - GET  /health, /healthz
/// - GET  {listing}               - invoice list (cached)
/// - GET  {listing}/{id}          - invoice detail (cached)
/// - POST {listing}/create        - create form action
/// - POST {listing}/{id}/edit     - update form action
/// - POST {listing}/{id}/delete   - delete form action
/// - POST /login                  - sign-in form action
pub fn build_router(state: AppState) -> Router {
    let listing = state.invoices.config().listing_path.clone();
    // "/" as listing path must not produce "//create"
    let base = listing.trim_end_matches('/');

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route(&listing, get(list_invoices))
        .route(&format!("{base}/create"), post(create_invoice))
        .route(&format!("{base}/{{id}}"), get(get_invoice))
        .route(&format!("{base}/{{id}}/edit"), post(update_invoice))
        .route(&format!("{base}/{{id}}/delete"), post(delete_invoice))
        .route("/login", post(login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

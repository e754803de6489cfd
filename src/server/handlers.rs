//! HTTP handlers for invoice pages and form posts

use super::cache::PageCache;
use super::effects;
use crate::actions::{AuthActions, InvoiceActions};
use crate::core::error::ActionError;
use crate::core::invoice::InvoiceId;
use crate::core::validation::RawForm;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Header telling whether a page came from the cache
pub const PAGE_CACHE_HEADER: &str = "x-page-cache";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub invoices: Arc<InvoiceActions>,
    /// Present when a sign-in backend was configured
    pub auth: Option<Arc<AuthActions>>,
    pub cache: PageCache,
}

fn cached(page: Value, hit: bool) -> Response {
    let marker = if hit { "hit" } else { "miss" };
    ([(PAGE_CACHE_HEADER, marker)], Json(page)).into_response()
}

/// GET {listing} - list invoices, newest first
pub async fn list_invoices(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ActionError> {
    let path = uri.path();
    if let Some(page) = state.cache.get(path) {
        return Ok(cached(page, true));
    }

    let invoices = state.invoices.store().list().await?;
    let page = json!({
        "invoices": invoices,
        "count": invoices.len(),
    });
    state.cache.put(path, page.clone());

    Ok(cached(page, false))
}

/// GET {listing}/{id} - a single invoice
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Response, ActionError> {
    let path = uri.path();
    if let Some(page) = state.cache.get(path) {
        return Ok(cached(page, true));
    }

    let invoice = state
        .invoices
        .store()
        .get(&InvoiceId::from(id.clone()))
        .await?
        .ok_or(ActionError::NotFound { id })?;
    let page = json!({ "invoice": invoice });
    state.cache.put(path, page.clone());

    Ok(cached(page, false))
}

/// POST {listing}/create
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let outcome = state.invoices.create(&RawForm::from(fields)).await;
    effects::apply(outcome, &state.cache)
}

/// POST {listing}/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let outcome = state
        .invoices
        .update(&InvoiceId::from(id), &RawForm::from(fields))
        .await;
    effects::apply(outcome, &state.cache)
}

/// POST {listing}/{id}/delete
pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let outcome = state.invoices.delete(&InvoiceId::from(id)).await;
    effects::apply(outcome, &state.cache)
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(auth) = &state.auth else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match auth.authenticate(&RawForm::from(fields)).await {
        Ok(outcome) => effects::apply(outcome, &state.cache),
        Err(err) => {
            tracing::error!(error = %err, "sign-in backend failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "code": "INTERNAL_ERROR",
                    "message": "Internal error during sign-in"
                })),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-actions"
    }))
}

//! Turns an [`ActionOutcome`] into an HTTP response

use super::cache::PageCache;
use crate::core::effects::{ActionOutcome, OutcomeKind};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

/// HTTP status for an outcome that does not redirect
pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Completed => StatusCode::OK,
        OutcomeKind::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        OutcomeKind::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Unauthorized => StatusCode::UNAUTHORIZED,
    }
}

/// Run the outcome's effects against the cache and build the response
///
/// Refreshes are applied first. A redirect becomes `303 See Other`;
/// otherwise the form state is returned as JSON.
pub fn apply(outcome: ActionOutcome, cache: &PageCache) -> Response {
    for path in outcome.refreshed_paths() {
        let dropped = cache.invalidate(path);
        tracing::debug!(path, dropped, "page cache refreshed");
    }

    if let Some(target) = outcome.redirect_target() {
        return Redirect::to(target).into_response();
    }

    (status_for(outcome.kind), Json(outcome.state)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionState;
    use crate::core::effects::Effect;
    use axum::http::header::LOCATION;
    use serde_json::json;

    #[test]
    fn test_redirect_becomes_see_other() {
        let cache = PageCache::new();
        cache.put("/dashboard/invoices", json!([]));

        let response = apply(
            ActionOutcome::completed(
                ActionState::default(),
                vec![
                    Effect::Refresh("/dashboard/invoices".into()),
                    Effect::Redirect("/dashboard/invoices".into()),
                ],
            ),
            &cache,
        );

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/dashboard/invoices");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failure_leaves_cache_alone() {
        let cache = PageCache::new();
        cache.put("/dashboard/invoices", json!([]));

        let response = apply(
            ActionOutcome::halted(
                OutcomeKind::Failed,
                ActionState::message("Database Error: Failed to Create Invoice."),
            ),
            &cache,
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(cache.contains("/dashboard/invoices"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(OutcomeKind::Rejected), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(OutcomeKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(OutcomeKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(OutcomeKind::Completed), StatusCode::OK);
    }
}

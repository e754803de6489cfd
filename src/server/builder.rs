//! ServerBuilder for fluent API to build the HTTP server

use super::cache::PageCache;
use super::handlers::AppState;
use super::router::build_router;
use crate::actions::{AuthActions, InvoiceActions};
use crate::config::ActionsConfig;
use crate::core::auth::Authenticator;
use crate::core::service::InvoiceStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the invoice actions server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_config(ActionsConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    config: ActionsConfig,
    cache: PageCache,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            authenticator: None,
            config: ActionsConfig::default(),
            cache: PageCache::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: ActionsConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable `POST /login` against the given sign-in backend
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Share a page cache with the caller, mostly useful to observe refreshes
    pub fn with_page_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    /// Add routes that don't belong to the invoice actions
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Assemble the handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        let auth = self
            .authenticator
            .take()
            .map(|authenticator| Arc::new(AuthActions::new(authenticator, self.config.clone())));

        Ok(AppState {
            invoices: Arc::new(InvoiceActions::new(store, self.config.clone())),
            auth,
            cache: self.cache.clone(),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_router(state);
        for routes in std::mem::take(&mut self.custom_routes) {
            app = app.merge(routes);
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingRowPolicy;
    use crate::core::auth::{Credentials, SignInError};
    use crate::storage::InMemoryInvoiceStore;
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait]
    impl Authenticator for AcceptAll {
        async fn sign_in(&self, _provider: &str, _credentials: &Credentials) -> Result<(), SignInError> {
            Ok(())
        }
    }

    // ── Constructor tests ────────────────────────────────────────────────

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.store.is_none());
        assert!(builder.authenticator.is_none());
        assert!(builder.custom_routes.is_empty());
        assert_eq!(builder.config, ActionsConfig::default());
    }

    // ── build_state ──────────────────────────────────────────────────────

    #[test]
    fn test_build_state_without_store_fails() {
        let result = ServerBuilder::new().build_state();
        let err_msg = format!("{}", result.err().expect("should be Err"));
        assert!(
            err_msg.contains("InvoiceStore is required"),
            "error should mention InvoiceStore: {}",
            err_msg
        );
    }

    #[test]
    fn test_build_state_rejects_invalid_listing_path() {
        let result = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_config(ActionsConfig::default().with_listing_path("invoices"))
            .build_state();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_state_carries_config() {
        let state = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_config(
                ActionsConfig::default()
                    .with_listing_path("/billing")
                    .with_missing_row_policy(MissingRowPolicy::Report),
            )
            .build_state()
            .expect("state should build");

        assert_eq!(state.invoices.config().listing_path, "/billing");
        assert_eq!(
            state.invoices.config().missing_row_policy,
            MissingRowPolicy::Report
        );
        assert!(state.auth.is_none());
    }

    #[test]
    fn test_build_state_with_authenticator() {
        let state = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_authenticator(AcceptAll)
            .build_state()
            .expect("state should build");
        assert!(state.auth.is_some());
    }

    #[test]
    fn test_shared_page_cache() {
        let cache = PageCache::new();
        let state = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_page_cache(cache.clone())
            .build_state()
            .expect("state should build");

        state.cache.put("/x", serde_json::json!(1));
        assert!(cache.contains("/x"));
    }

    // ── build ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_build_with_custom_routes() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use axum::routing::get;
        use tower::ServiceExt;

        let custom = Router::new().route("/custom", get(|| async { "ok" }));
        let router = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_custom_routes(custom)
            .build()
            .expect("build should succeed with custom routes");

        let response = router
            .oneshot(Request::get("/custom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! # Invoice Actions
//!
//! Server-side form actions for an invoice dashboard: create, update and
//! delete invoices from raw form submissions, with field-level validation,
//! dollar to cents conversion, SQL persistence and post-mutation effects.
//!
//! ## Features
//!
//! - **Form Actions**: `create`, `update` and `delete` return an outcome
//!   carrying the form state and the effects to apply
//! - **Field Validation**: every field is checked, errors are reported per field
//! - **Effects as Data**: cache refreshes and redirects are values, applied by
//!   the HTTP layer
//! - **Pluggable Storage**: in-memory store by default, PostgreSQL behind the
//!   `postgres` feature
//! - **Configuration-Based**: listing path and missing-row behavior via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_actions::prelude::*;
//! use std::sync::Arc;
//!
//! let actions = InvoiceActions::new(
//!     Arc::new(InMemoryInvoiceStore::new()),
//!     ActionsConfig::default(),
//! );
//!
//! let form = RawForm::new()
//!     .with("customerId", "c-1")
//!     .with("amount", "19.99")
//!     .with("status", "pending");
//!
//! let outcome = actions.create(&form).await;
//! assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{ActionState, AuthActions, InvoiceActions, messages};

    // === Core ===
    pub use crate::core::{
        ActionError, ActionOutcome, AuthError, Authenticator, Cents, ConfigError, Credentials,
        Effect, FieldErrors, FormValidator, Invoice, InvoiceChanges, InvoiceId, InvoiceStatus,
        InvoiceStore, NewInvoice, OutcomeKind, RawForm, SignInError, StorageError, StorageResult,
    };

    // === Configuration ===
    pub use crate::config::{ActionsConfig, AppConfig, MissingRowPolicy};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Server ===
    pub use crate::server::{AppState, PageCache, ServerBuilder};

    // === Re-exports from external crates ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}

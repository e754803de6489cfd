//! Typed error handling for invoice actions
//!
//! Form actions recover validation and storage failures into an
//! [`ActionState`](crate::actions::ActionState) for display, and sign-in
//! refusals into a message. The types here cover the rest: read endpoints
//! map [`ActionError`] onto an HTTP response, configuration loading reports
//! [`ConfigError`], and authentication backends report [`AuthError`].
//!
//! # Error Categories
//!
//! - [`StorageError`]: the invoice store rejected or failed a statement
//! - [`AuthError`]: the authentication backend refused a sign-in
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match store.get(&id).await {
//!     Ok(Some(invoice)) => Ok(Json(invoice)),
//!     Ok(None) => Err(ActionError::NotFound { id: id.to_string() }),
//!     Err(e) => Err(ActionError::Storage(e)),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the read endpoints
#[derive(Debug, Error)]
pub enum ActionError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No invoice with the requested id
    #[error("invoice with id '{id}' not found")]
    NotFound { id: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ActionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Storage(e) => e.status_code(),
            ActionError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Storage(e) => e.error_code(),
            ActionError::NotFound { .. } => "INVOICE_NOT_FOUND",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ActionError::NotFound { id } => Some(serde_json::json!({ "id": id })),
            ActionError::Storage(_) => None,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by invoice store backends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// The backend rejected or failed a statement
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// A constraint (foreign key, check) was violated
    #[error("Data integrity error: {message}")]
    Integrity { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Connection { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::Query { .. } => "STORAGE_QUERY_ERROR",
            StorageError::Integrity { .. } => "STORAGE_INTEGRITY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Sign-in failures reported by the authentication backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The submitted credentials were rejected
    #[error("credentials sign-in failed")]
    CredentialsSignin,

    /// Any other authentication failure (callback, provider, session)
    #[error("authentication failed ({kind}): {message}")]
    Other { kind: String, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

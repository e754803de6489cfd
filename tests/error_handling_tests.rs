//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use invoice_actions::prelude::*;

fn storage_query_error() -> StorageError {
    StorageError::Query {
        backend: "PostgreSQL".to_string(),
        message: "relation \"invoices\" does not exist".to_string(),
    }
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_not_found_returns_404() {
        let err = ActionError::NotFound {
            id: "42".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_query_returns_500() {
        let err = ActionError::Storage(storage_query_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_unavailable_returns_503() {
        let err = ActionError::Storage(StorageError::Unavailable {
            backend: "PostgreSQL".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_storage_integrity_returns_500() {
        let err = ActionError::Storage(StorageError::Integrity {
            message: "violates foreign key constraint".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_INTEGRITY_ERROR");
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod response_format_tests {
    use super::*;

    #[test]
    fn test_not_found_response_carries_id() {
        let response = ActionError::NotFound {
            id: "abc".to_string(),
        }
        .to_response();

        assert_eq!(response.code, "INVOICE_NOT_FOUND");
        assert_eq!(response.details.unwrap()["id"], "abc");
    }

    #[test]
    fn test_storage_response_has_no_details() {
        let response = ActionError::Storage(storage_query_error()).to_response();

        assert_eq!(response.code, "STORAGE_QUERY_ERROR");
        assert!(response.details.is_none());
        assert!(response.message.contains("PostgreSQL"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ActionError::NotFound {
            id: "abc".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    fn fetch() -> Result<(), ActionError> {
        let query: Result<(), StorageError> = Err(storage_query_error());
        query?;
        Ok(())
    }

    #[test]
    fn test_question_mark_converts_storage_error() {
        let err = fetch().unwrap_err();
        assert!(matches!(err, ActionError::Storage(StorageError::Query { .. })));
        assert_eq!(err.error_code(), "STORAGE_QUERY_ERROR");
    }

    #[test]
    fn test_transparent_display() {
        let err = ActionError::from(storage_query_error());
        assert_eq!(err.to_string(), storage_query_error().to_string());
    }
}

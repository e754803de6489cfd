//! Form state returned to the client for display

use crate::core::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// Summary messages shown above the form
pub mod messages {
    pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
    pub const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
    pub const CREATE_DATABASE_ERROR: &str = "Database Error: Failed to Create Invoice.";
    pub const UPDATE_DATABASE_ERROR: &str = "Database Error: Failed to Update Invoice.";
    pub const DELETE_DATABASE_ERROR: &str = "Database Error: Failed to Delete Invoice.";
    pub const UPDATE_NOT_FOUND: &str = "Invoice Not Found. Failed to Update Invoice.";
    pub const DELETE_NOT_FOUND: &str = "Invoice Not Found. Failed to Delete Invoice.";
    pub const DELETED: &str = "Invoice Deleted.";
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
    pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";
}

/// `{ errors?: { field: [messages] }, message?: string }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionState {
    /// State carrying only a summary message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// State carrying field errors and a summary message
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_none() && self.message.is_none()
    }
}

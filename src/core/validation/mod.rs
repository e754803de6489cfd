//! Form validation
//!
//! Raw form posts arrive as string fields. A [`FormValidator`] coerces them
//! into typed values or returns every failing field with its messages.

pub mod form;
pub mod validators;

pub use form::{InvoiceFields, InvoiceFormValidator};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Submitted form fields, by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    fields: HashMap<String, String>,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and programmatic callers
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value; `None` when the field was not submitted
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for RawForm {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Validation messages keyed by form field name
///
/// Fields keep the order in which they were first reported, so
/// serialized output lists them the way the form does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for a field, empty when the field is valid
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failing fields
    pub fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Coerces raw form input into a typed value
pub trait FormValidator: Send + Sync {
    type Output;

    fn validate(&self, raw: &RawForm) -> Result<Self::Output, FieldErrors>;
}

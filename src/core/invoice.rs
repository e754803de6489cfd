//! Invoice domain types
//!
//! The store owns durable invoice state; these types only carry it between
//! the form actions and the storage backends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque invoice identifier, generated by the store on insert
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InvoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for InvoiceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Payment status of an invoice
///
/// Any transition between the two states is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in form order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the accepted statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown invoice status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Currency amount in integer minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a dollar amount to cents, rounding half away from zero
    ///
    /// Returns `None` when the rounded value does not fit in an `i64`.
    pub fn from_dollars(dollars: f64) -> Option<Self> {
        let cents = (dollars * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        let in_range = cents >= i64::MIN as f64 && cents < i64::MAX as f64;
        in_range.then(|| Self(cents as i64))
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// A stored invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Column values for an insert; the id comes from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    /// Materialize the row once the store has assigned an id
    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date: self.date,
        }
    }
}

/// The mutable columns of an invoice; id and date never change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

impl InvoiceChanges {
    pub fn apply_to(&self, invoice: &mut Invoice) {
        invoice.customer_id = self.customer_id.clone();
        invoice.amount = self.amount;
        invoice.status = self.status;
    }
}

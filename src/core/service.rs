//! Service trait for invoice persistence

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceId, NewInvoice};
use async_trait::async_trait;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence seam for invoices
///
/// Each method maps to one autocommit statement. Implementations must not
/// check that a row exists before `update` or `delete`; they report the
/// number of rows affected instead and leave the policy to the caller.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a row; the store generates and returns the id
    async fn insert(&self, invoice: NewInvoice) -> StorageResult<InvoiceId>;

    /// Update customer, amount and status; returns rows affected
    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> StorageResult<u64>;

    /// Delete a row; returns rows affected
    async fn delete(&self, id: &InvoiceId) -> StorageResult<u64>;

    /// Get an invoice by id
    async fn get(&self, id: &InvoiceId) -> StorageResult<Option<Invoice>>;

    /// List all invoices, newest date first
    async fn list(&self) -> StorageResult<Vec<Invoice>>;
}

//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceId, NewInvoice};
use crate::core::service::{InvoiceStore, StorageResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory invoice store
///
/// Uses RwLock for thread-safe access. Rows keep insertion order. Clones
/// share the same rows, so a test can hand one clone to the actions and
/// inspect another.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    rows: Arc<RwLock<IndexMap<InvoiceId, Invoice>>>,
    customers: Option<Arc<HashSet<String>>>,
    writes: Arc<AtomicUsize>,
    failing_writes: Arc<AtomicUsize>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store that accepts any customer id
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce the customer foreign key against a fixed set of customers
    pub fn with_customers<I, S>(mut self, customers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customers = Some(Arc::new(customers.into_iter().map(Into::into).collect()));
        self
    }

    /// Make the next `count` writes fail with a query error
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Number of write statements issued so far, failed ones included
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of every row, in insertion order
    pub fn snapshot(&self) -> Vec<Invoice> {
        self.rows
            .read()
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    fn begin_write(&self) -> StorageResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StorageError::Query {
                backend: BACKEND.to_string(),
                message: "simulated write failure".to_string(),
            });
        }
        Ok(())
    }

    fn check_customer(&self, customer_id: &str) -> StorageResult<()> {
        match &self.customers {
            Some(known) if !known.contains(customer_id) => Err(StorageError::Integrity {
                message: format!(
                    "insert or update on table \"invoices\" violates foreign key constraint: customer '{}' does not exist",
                    customer_id
                ),
            }),
            _ => Ok(()),
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable {
        backend: format!("{} (lock poisoned: {})", BACKEND, e),
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> StorageResult<InvoiceId> {
        self.begin_write()?;
        self.check_customer(&invoice.customer_id)?;

        let mut rows = self.rows.write().map_err(lock_error)?;
        let id = InvoiceId::new(Uuid::new_v4().to_string());
        rows.insert(id.clone(), invoice.into_invoice(id.clone()));

        Ok(id)
    }

    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> StorageResult<u64> {
        self.begin_write()?;
        self.check_customer(&changes.customer_id)?;

        let mut rows = self.rows.write().map_err(lock_error)?;
        Ok(match rows.get_mut(id) {
            Some(row) => {
                changes.apply_to(row);
                1
            }
            None => 0,
        })
    }

    async fn delete(&self, id: &InvoiceId) -> StorageResult<u64> {
        self.begin_write()?;

        let mut rows = self.rows.write().map_err(lock_error)?;
        Ok(rows.shift_remove(id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &InvoiceId) -> StorageResult<Option<Invoice>> {
        let rows = self.rows.read().map_err(lock_error)?;
        Ok(rows.get(id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<Invoice>> {
        let rows = self.rows.read().map_err(lock_error)?;
        let mut invoices: Vec<Invoice> = rows.values().cloned().collect();
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::{Cents, InvoiceStatus};
    use chrono::NaiveDate;

    fn new_invoice(customer: &str, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: customer.to_string(),
            amount: Cents::new(1000),
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    fn changes(customer: &str) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: customer.to_string(),
            amount: Cents::new(2500),
            status: InvoiceStatus::Paid,
        }
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let store = InMemoryInvoiceStore::new();
        let a = store.insert(new_invoice("c1", 1)).await.unwrap();
        let b = store.insert(new_invoice("c1", 1)).await.unwrap();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_row_affects_nothing() {
        let store = InMemoryInvoiceStore::new();
        store.insert(new_invoice("c1", 1)).await.unwrap();

        let rows = store
            .update(&InvoiceId::from("nope"), changes("c2"))
            .await
            .unwrap();

        assert_eq!(rows, 0);
        assert_eq!(store.snapshot()[0].customer_id, "c1");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryInvoiceStore::new();
        let id = store.insert(new_invoice("c1", 1)).await.unwrap();

        assert_eq!(store.delete(&id).await.unwrap(), 1);
        assert_eq!(store.delete(&id).await.unwrap(), 0);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = InMemoryInvoiceStore::new();
        store.insert(new_invoice("old", 2)).await.unwrap();
        store.insert(new_invoice("new", 20)).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].customer_id, "new");
        assert_eq!(listed[1].customer_id, "old");
    }

    #[tokio::test]
    async fn test_fail_next_writes() {
        let store = InMemoryInvoiceStore::new();
        store.fail_next_writes(1);

        let err = store.insert(new_invoice("c1", 1)).await.unwrap_err();
        assert!(matches!(err, StorageError::Query { .. }));
        assert!(store.insert(new_invoice("c1", 1)).await.is_ok());
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_customer_violates_foreign_key() {
        let store = InMemoryInvoiceStore::new().with_customers(["c1"]);

        let err = store.insert(new_invoice("ghost", 1)).await.unwrap_err();
        assert!(matches!(err, StorageError::Integrity { .. }));

        let id = store.insert(new_invoice("c1", 1)).await.unwrap();
        let err = store.update(&id, changes("ghost")).await.unwrap_err();
        assert!(matches!(err, StorageError::Integrity { .. }));
    }
}

//! Invoice store abstraction
//!
//! The store is the only shared mutable resource in the system. It owns all
//! invoice records and is responsible for safe concurrent access to its
//! internal map. It provides no cross-call atomicity: a read-modify-write
//! sequence through `find_by_id` and `save` is not atomic end-to-end, so
//! logically conflicting callers race with last-write-wins.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

use crate::identifiers::InvoiceId;
use crate::invoice::Invoice;

/// Errors that can occur in a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Internal synchronization failed (a writer panicked holding the lock)
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Persistence seam for invoices
///
/// Implementations must support concurrent `save`/`find_by_id`/`find_all`
/// from multiple callers without corrupting internal structure.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Inserts or overwrites the record keyed by its id
    async fn save(&self, invoice: Invoice) -> Result<Invoice, StoreError>;

    /// Returns the current record, or `None` if absent
    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// Returns a snapshot copy of all records at call time
    ///
    /// Order is unspecified and must not be relied upon.
    async fn find_all(&self) -> Result<Vec<Invoice>, StoreError>;
}

/// In-memory invoice store
///
/// Volatile for the process lifetime; records are never deleted. Each
/// individual operation takes the lock for its full duration, so a single
/// `save` or `find_by_id` is atomic even though sequences of calls are not.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    invoices: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn save(&self, invoice: Invoice) -> Result<Invoice, StoreError> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn find_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(invoices.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, StoreError> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(invoices.values().cloned().collect())
    }
}

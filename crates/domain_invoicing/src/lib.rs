//! Invoicing Domain - Invoice Lifecycle Management
//!
//! This crate implements the invoice lifecycle: creation, payment
//! application, and batch processing of overdue invoices.
//!
//! # Invoice Lifecycle
//!
//! Every invoice starts `Pending` and ends in exactly one terminal state:
//! - `Pending -> Paid` when cumulative payments reach the invoice total
//! - `Pending -> Paid` when the overdue sweep rolls over a partially paid invoice
//! - `Pending -> Void` when the overdue sweep rolls over an unpaid invoice
//!
//! The overdue sweep closes out each qualifying invoice and spawns a
//! successor invoice carrying the unpaid remainder plus the late fee.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoicing::{InvoiceService, InMemoryInvoiceStore};
//!
//! let service = InvoiceService::new(Arc::new(InMemoryInvoiceStore::new()));
//!
//! let invoice = service.create_invoice(dec!(1000), due_date).await?;
//! service.add_payment(invoice.id, dec!(400)).await?;
//! service.process_overdue(dec!(100), 10).await?;
//! ```

pub mod error;
pub mod identifiers;
pub mod invoice;
pub mod service;
pub mod store;

pub use error::{DateOutOfRange, InvoiceError};
pub use identifiers::InvoiceId;
pub use invoice::{Invoice, InvoiceStatus};
pub use service::InvoiceService;
pub use store::{InMemoryInvoiceStore, InvoiceStore, StoreError};

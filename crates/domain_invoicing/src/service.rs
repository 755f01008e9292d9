//! Invoice lifecycle service
//!
//! Orchestrates invoice creation, payment application, and the overdue
//! sweep. The service holds no invoice state of its own: every operation
//! re-reads the store, so a stale in-process copy can never be mutated.
//!
//! Concurrency: the store serializes individual reads and writes, but a
//! payment is a read-modify-write across two store calls. Concurrent
//! payments against the same invoice therefore race with last-write-wins;
//! callers needing strict per-invoice consistency must serialize upstream.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::error::{DateOutOfRange, InvoiceError};
use crate::identifiers::InvoiceId;
use crate::invoice::Invoice;
use crate::store::InvoiceStore;

/// Service driving the invoice lifecycle state machine
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceService {
    /// Creates a new service backed by the given store
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    /// Creates and persists a new pending invoice
    ///
    /// # Arguments
    ///
    /// * `amount` - Total obligation (positivity is enforced at the boundary)
    /// * `due_date` - Date the amount is due
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::Processing` if the store fails, carrying the
    /// requested amount and due date for diagnostics.
    pub async fn create_invoice(
        &self,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Invoice, InvoiceError> {
        tracing::info!(%amount, %due_date, "Creating invoice");

        let invoice = Invoice::new(amount, due_date);
        let saved = self.store.save(invoice).await.map_err(|e| {
            InvoiceError::processing(
                format!(
                    "Error occurred while creating invoice, amount: {amount}, due_date: {due_date}"
                ),
                e,
            )
        })?;

        tracing::info!(invoice_id = %saved.id, %amount, %due_date, "Created invoice");
        Ok(saved)
    }

    /// Returns a snapshot of all invoices
    ///
    /// An empty store yields an empty vector, not an error.
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
        let invoices = self.store.find_all().await.map_err(|e| {
            InvoiceError::processing("Error occurred while retrieving all invoices", e)
        })?;

        tracing::info!(count = invoices.len(), "Retrieved all invoices");
        Ok(invoices)
    }

    /// Applies a payment to an invoice
    ///
    /// Adds the payment to the invoice's cumulative `paid_amount` and
    /// transitions it to `Paid` once the total is covered. Overpayment is
    /// accepted and recorded in full.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::NotFound` if no invoice exists with the given
    /// id (nothing is written in that case); any other failure surfaces as
    /// `InvoiceError::Processing` with id and amount context.
    pub async fn add_payment(
        &self,
        invoice_id: InvoiceId,
        amount: Decimal,
    ) -> Result<(), InvoiceError> {
        tracing::info!(%invoice_id, %amount, "Adding payment to invoice");

        let wrap = |e: crate::store::StoreError| {
            InvoiceError::processing(
                format!(
                    "Error occurred while adding payment to invoice, invoice_id: {invoice_id}, amount: {amount}"
                ),
                e,
            )
        };

        let mut invoice = self
            .store
            .find_by_id(invoice_id)
            .await
            .map_err(&wrap)?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        invoice.record_payment(amount);
        self.store.save(invoice).await.map_err(&wrap)?;

        tracing::info!(%invoice_id, %amount, "Added payment to invoice");
        Ok(())
    }

    /// Processes all overdue invoices as of today
    ///
    /// See [`InvoiceService::process_overdue_as_of`] for the sweep rules.
    pub async fn process_overdue(
        &self,
        late_fee: Decimal,
        overdue_days: i64,
    ) -> Result<(), InvoiceError> {
        self.process_overdue_as_of(late_fee, overdue_days, Utc::now().date_naive())
            .await
    }

    /// Processes all overdue invoices against an explicit reference date
    ///
    /// Sweeps every pending invoice whose `due_date + overdue_days` falls
    /// strictly before `today` and rolls it over:
    ///
    /// - partially paid: the original is marked `Paid` and a successor is
    ///   created for `balance_due + late_fee`;
    /// - nothing paid: the original is marked `Void` and a successor is
    ///   created for `amount + late_fee`.
    ///
    /// Successors are due `today + overdue_days` and go through
    /// [`InvoiceService::create_invoice`]. Each qualifying invoice is
    /// processed independently, so enumeration order does not affect the
    /// result. All other invoices are left untouched.
    ///
    /// # Errors
    ///
    /// Any failure aborts the sweep and surfaces as a single
    /// `InvoiceError::Processing` carrying the late fee and overdue days;
    /// invoices already persisted before the failure are not rolled back.
    pub async fn process_overdue_as_of(
        &self,
        late_fee: Decimal,
        overdue_days: i64,
        today: NaiveDate,
    ) -> Result<(), InvoiceError> {
        tracing::info!(%late_fee, overdue_days, %today, "Processing overdue invoices");

        self.sweep(late_fee, overdue_days, today).await.map_err(|e| {
            InvoiceError::processing(
                format!(
                    "Error occurred while processing overdue invoices, late_fee: {late_fee}, overdue_days: {overdue_days}"
                ),
                e,
            )
        })?;

        tracing::info!(%late_fee, overdue_days, "Processed overdue invoices");
        Ok(())
    }

    async fn sweep(
        &self,
        late_fee: Decimal,
        overdue_days: i64,
        today: NaiveDate,
    ) -> Result<(), InvoiceError> {
        for mut invoice in self.store.find_all().await.map_err(|e| {
            InvoiceError::processing("Failed to enumerate invoices for overdue sweep", e)
        })? {
            let overdue = invoice.is_overdue(overdue_days, today).map_err(|e| {
                InvoiceError::processing(
                    format!(
                        "Failed to evaluate overdue window, invoice_id: {}, overdue_days: {overdue_days}",
                        invoice.id
                    ),
                    e,
                )
            })?;
            if !overdue {
                continue;
            }

            let successor_due = add_days(today, overdue_days).map_err(|e| {
                InvoiceError::processing(
                    format!("Failed to compute successor due date, overdue_days: {overdue_days}"),
                    e,
                )
            })?;

            let successor_amount = if invoice.has_payments() {
                tracing::info!(
                    invoice_id = %invoice.id,
                    paid_amount = %invoice.paid_amount,
                    %late_fee,
                    "Rolling over partially paid overdue invoice"
                );
                invoice.mark_settled();
                invoice.balance_due() + late_fee
            } else {
                tracing::info!(
                    invoice_id = %invoice.id,
                    %late_fee,
                    "Rolling over unpaid overdue invoice"
                );
                invoice.mark_void();
                invoice.amount + late_fee
            };

            // Failures inside the nested create propagate into the outer
            // sweep wrapping rather than being swallowed per invoice.
            self.create_invoice(successor_amount, successor_due).await?;

            self.store.save(invoice.clone()).await.map_err(|e| {
                InvoiceError::processing(
                    format!("Failed to persist rolled-over invoice, invoice_id: {}", invoice.id),
                    e,
                )
            })?;

            tracing::info!(
                invoice_id = %invoice.id,
                status = ?invoice.status,
                "Updated overdue invoice"
            );
        }

        Ok(())
    }
}

/// Adds a signed day offset to a date with range checking
fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DateOutOfRange> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| DateOutOfRange {
            context: format!("{date} + {days} days"),
        })
}

//! Invoice entity and status transitions
//!
//! An invoice is a billable obligation with a fixed amount and due date.
//! Only `paid_amount` and `status` mutate after creation, and status
//! transitions are one-directional: `Pending` is the only non-terminal state.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DateOutOfRange;
use crate::identifiers::InvoiceId;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting full payment
    Pending,
    /// Fully paid, or settled out via overdue rollover
    Paid,
    /// Voided by the overdue sweep with nothing paid against it
    Void,
}

impl InvoiceStatus {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Void)
    }
}

/// A billable obligation tracked through its payment lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier, immutable after creation
    pub id: InvoiceId,
    /// Total obligation, immutable after creation
    pub amount: Decimal,
    /// Cumulative amount paid, monotonically non-decreasing
    pub paid_amount: Decimal,
    /// Calendar date the amount is due, immutable after creation
    pub due_date: NaiveDate,
    /// Current lifecycle status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Creates a new pending invoice with a fresh identifier
    ///
    /// # Arguments
    ///
    /// * `amount` - Total obligation (positive; enforced at the boundary)
    /// * `due_date` - Date the amount is due
    pub fn new(amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: InvoiceId::new(),
            amount,
            paid_amount: Decimal::ZERO,
            due_date,
            status: InvoiceStatus::Pending,
        }
    }

    /// Records a payment against the invoice
    ///
    /// Transitions to `Paid` once cumulative payments reach the total.
    /// Overpayment is accepted and recorded in full rather than capped;
    /// `paid_amount` may exceed `amount`.
    pub fn record_payment(&mut self, amount: Decimal) {
        self.paid_amount += amount;

        if self.paid_amount >= self.amount {
            self.status = InvoiceStatus::Paid;
        }
    }

    /// Returns the unpaid remainder
    pub fn balance_due(&self) -> Decimal {
        self.amount - self.paid_amount
    }

    /// Returns true if any payment has been recorded
    pub fn has_payments(&self) -> bool {
        self.paid_amount > Decimal::ZERO
    }

    /// Checks whether the invoice has missed its grace-extended due date
    ///
    /// An invoice is overdue when it is still `Pending` and
    /// `due_date + grace_days` is strictly before `as_of`. Terminal invoices
    /// are never overdue.
    ///
    /// # Errors
    ///
    /// Returns `DateOutOfRange` if `due_date + grace_days` leaves the
    /// representable calendar range.
    pub fn is_overdue(&self, grace_days: i64, as_of: NaiveDate) -> Result<bool, DateOutOfRange> {
        if self.status != InvoiceStatus::Pending {
            return Ok(false);
        }

        let grace_end = Duration::try_days(grace_days)
            .and_then(|delta| self.due_date.checked_add_signed(delta))
            .ok_or_else(|| DateOutOfRange {
                context: format!("{} + {} days", self.due_date, grace_days),
            })?;

        Ok(grace_end < as_of)
    }

    /// Closes the invoice as settled-out via rollover
    pub fn mark_settled(&mut self) {
        self.status = InvoiceStatus::Paid;
    }

    /// Closes the invoice as void
    pub fn mark_void(&mut self) {
        self.status = InvoiceStatus::Void;
    }
}

//! Invoice DTOs
//!
//! Wire format uses camelCase field names. Boundary validation lives here:
//! requests reject non-positive amounts before anything reaches the
//! lifecycle service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_invoicing::{Invoice, InvoiceStatus};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

impl CreateInvoiceRequest {
    /// Validates field constraints, collecting all violations
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if self.amount <= Decimal::ZERO {
            errors.push("amount: Amount must be positive".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaymentRequest {
    pub amount: Decimal,
}

impl InvoicePaymentRequest {
    /// Validates field constraints, collecting all violations
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.amount <= Decimal::ZERO {
            return Err(ApiError::validation(vec![
                "amount: Amount must be positive".to_string(),
            ]));
        }
        Ok(())
    }
}

/// Late fee may be zero; no positivity constraint applies here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOverdueRequest {
    pub late_fee: Decimal,
    pub overdue_days: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: String,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            amount: invoice.amount,
            paid_amount: invoice.paid_amount,
            due_date: invoice.due_date,
            status: invoice.status,
        }
    }
}

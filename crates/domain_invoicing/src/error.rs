//! Invoicing domain errors
//!
//! Two observable categories: a referenced invoice that does not exist, and
//! a catch-all processing failure wrapping the causing error with the
//! operation's input context. Callers pattern-match on the variant instead
//! of inspecting message text.

use thiserror::Error;

use crate::identifiers::InvoiceId;

/// Date arithmetic left the representable calendar range
#[derive(Debug, Error)]
#[error("Date out of range: {context}")]
pub struct DateOutOfRange {
    pub context: String,
}

/// Errors raised by the invoice lifecycle service
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The referenced invoice does not exist in the store
    #[error("Invoice not found with id: {0}")]
    NotFound(InvoiceId),

    /// Unexpected failure during an operation, with input context preserved
    #[error("{context}")]
    Processing {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InvoiceError {
    /// Wraps an unexpected error with the failing operation's context
    pub fn processing(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        InvoiceError::Processing {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if this error is the not-found category
    pub fn is_not_found(&self) -> bool {
        matches!(self, InvoiceError::NotFound(_))
    }
}

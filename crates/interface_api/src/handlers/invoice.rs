//! Invoice handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain_invoicing::InvoiceId;

use crate::dto::invoice::*;
use crate::dto::ApiJson;
use crate::error::ApiError;
use crate::AppState;

/// Creates a new invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<CreateInvoiceResponse>), ApiError> {
    request.validate()?;

    let invoice = state
        .service
        .create_invoice(request.amount, request.due_date)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInvoiceResponse {
            id: invoice.id.to_string(),
        }),
    ))
}

/// Lists all invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.service.list_invoices().await?;
    Ok(Json(invoices.into_iter().map(InvoiceResponse::from).collect()))
}

/// Adds a payment to an invoice
///
/// A path id that does not parse as an invoice identifier maps to the same
/// not-found category as an unknown id.
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<InvoicePaymentRequest>,
) -> Result<StatusCode, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::validation(vec![
            "id: ID must not be blank".to_string(),
        ]));
    }
    request.validate()?;

    let invoice_id: InvoiceId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Invoice not found with id: {id}")))?;

    state.service.add_payment(invoice_id, request.amount).await?;
    Ok(StatusCode::OK)
}

/// Processes overdue invoices, applying late fees and rolling over balances
pub async fn process_overdue(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ProcessOverdueRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .process_overdue(request.late_fee, request.overdue_days)
        .await?;
    Ok(StatusCode::OK)
}

//! HTTP API Layer
//!
//! This crate provides the REST API for the invoice lifecycle service using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for invoice operations and health checks
//! - **DTOs**: Request/Response data transfer objects with boundary validation
//! - **Error Handling**: One structured error envelope per failure class
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_invoicing::InvoiceService;

use crate::handlers::{health, invoice};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: InvoiceService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - The invoice lifecycle service backing all handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: InvoiceService) -> Router {
    let state = AppState { service };

    let invoice_routes = Router::new()
        .route("/", post(invoice::create_invoice))
        .route("/", get(invoice::list_invoices))
        .route("/:id/payments", post(invoice::pay_invoice))
        .route("/process-overdue", post(invoice::process_overdue));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/invoices", invoice_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

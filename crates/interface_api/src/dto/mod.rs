//! Request/Response data transfer objects

pub mod invoice;

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON extractor that maps body rejections into the structured error
/// envelope instead of axum's plain-text default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

//! Request extractors

use axum::extract::FromRequest;

use crate::error::app_error::AppError;

/// `axum::Json` whose rejection renders as an [`AppError`] body
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

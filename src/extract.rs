use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` that rejects malformed or mistyped bodies with a 400 carrying the
/// parser message, instead of axum's 415/422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

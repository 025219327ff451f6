use crate::error::AppError;

/// Marketplace routes that are mapped but have no behavior yet.
pub async fn not_implemented() -> AppError {
    AppError::NotImplemented
}

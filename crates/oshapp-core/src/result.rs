//! Convenience result type alias.

use crate::error::AppError;

/// A specialized `Result` type for workflow and dispatch operations.
pub type AppResult<T> = Result<T, AppError>;

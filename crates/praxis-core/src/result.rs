//! Application result alias.

use crate::error::AppError;

/// Convenience alias used by all fallible Praxis APIs.
pub type AppResult<T> = Result<T, AppError>;

use crate::common::error::MultirepoError;

/// Convenience alias used across use cases and infrastructure.
pub type MultirepoResult<T> = Result<T, MultirepoError>;

//! Error types for the audit crate

use agrorural_domain::errors::DomainError;
use thiserror::Error;

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can occur while recording the audit trail
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),

    #[error("Configuration error: {field} - {message}")]
    ConfigError { field: String, message: String },
}

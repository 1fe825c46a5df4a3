//! Application layer error types
//!
//! These errors represent application-level failures that are suitable
//! for API consumption. They wrap domain errors with additional context.

use agrorural_domain::errors::DomainError;
use thiserror::Error;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    // === Validation Errors ===
    /// Input validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // === Not Found Errors ===
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    // === Conflict Errors ===
    /// Uniqueness or reference conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    // === Business Rule Violations ===
    /// Business rule violation
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    // === Infrastructure Errors ===
    /// Repository operation failed
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidDocumento { .. }
            | DomainError::InvalidUf { .. }
            | DomainError::InvalidArea { .. }
            | DomainError::InvalidId { .. } => ApplicationError::ValidationFailed(err.to_string()),
            DomainError::ValidationError { field, reason } => {
                ApplicationError::ValidationFailed(format!("{}: {}", field, reason))
            }
            DomainError::BusinessRuleViolation { rule } => {
                ApplicationError::BusinessRuleViolation(rule)
            }
            DomainError::EntityNotFound { entity_type, id } => ApplicationError::NotFound {
                entity: entity_type,
                id,
            },
            DomainError::Conflict {
                entity_type,
                reason,
            } => ApplicationError::Conflict(format!("{}: {}", entity_type, reason)),
            DomainError::StorageFailure { reason } => ApplicationError::RepositoryError(reason),
        }
    }
}

//! Domain errors for AgroRural

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid tax document: {reason}")]
    InvalidDocumento { reason: String },

    #[error("Invalid federative unit: {value}")]
    InvalidUf { value: String },

    #[error("Invalid area for {field}: {reason}")]
    InvalidArea { field: String, reason: String },

    #[error("Invalid identifier for {entity_type}: {value}")]
    InvalidId { entity_type: String, value: String },

    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Conflict on {entity_type}: {reason}")]
    Conflict { entity_type: String, reason: String },

    #[error("Storage failure: {reason}")]
    StorageFailure { reason: String },
}

impl DomainError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing entity
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a broken business rule
    pub fn rule(rule: impl Into<String>) -> Self {
        Self::BusinessRuleViolation { rule: rule.into() }
    }

    /// Shorthand for a uniqueness or reference conflict
    pub fn conflict(entity_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conflict {
            entity_type: entity_type.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

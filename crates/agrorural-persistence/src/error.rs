//! Persistence Layer Error Types
//!
//! Error mapping to domain types

use agrorural_domain::errors::DomainError;
use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Unique or foreign key constraint rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A stored row could not be turned back into a domain value
    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow { table: &'static str, reason: String },

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database error
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[cfg(feature = "sqlite")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl PersistenceError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn corrupt(table: &'static str, reason: impl ToString) -> Self {
        Self::CorruptRow {
            table,
            reason: reason.to_string(),
        }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity_type, id } => {
                DomainError::not_found(entity_type, id)
            }
            PersistenceError::Constraint(msg) => DomainError::conflict("storage", msg),
            #[cfg(feature = "sqlite")]
            PersistenceError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                DomainError::conflict("storage", db.message().to_string())
            }
            #[cfg(feature = "sqlite")]
            PersistenceError::Database(sqlx::Error::Database(db))
                if db.is_foreign_key_violation() =>
            {
                DomainError::conflict("storage", db.message().to_string())
            }
            other => DomainError::StorageFailure {
                reason: other.to_string(),
            },
        }
    }
}

//! Domain entities

pub mod audit;
pub mod cultivo;
pub mod cultura;
pub mod produtor;
pub mod propriedade;
pub mod safra;

pub use audit::{AuditAction, AuditEntry, AuditFilter, EntityKind};
pub use cultivo::Cultivo;
pub use cultura::Cultura;
pub use produtor::Produtor;
pub use propriedade::{Areas, AreasPatch, PropriedadeRural};
pub use safra::Safra;

use crate::errors::{DomainError, DomainResult};

/// Trim and bound-check a required text field
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(trimmed.to_string())
}

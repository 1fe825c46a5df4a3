//! AgroRural Domain Layer
//!
//! Entities, value objects and business rules for producers, rural
//! properties, crops, cultivation seasons and planting records.
//!
//! ```text
//! Produtor ──< produtor_propriedade >── PropriedadeRural ──< Safra ──< Cultivo >── Cultura
//! ```
//!
//! Invariants enforced here:
//! - producers are identified by a valid CPF or CNPJ
//! - `area_agricultavel + area_vegetacao <= area_total`
//! - planted area of a season never exceeds the property's arable area
//!
//! Storage contracts live in [`repositories`]; implementations are provided
//! by the persistence crate.

pub mod dashboard;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod rules;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};

//! AgroRural Audit Trail
//!
//! Turns application events into persisted audit entries. Every create,
//! update and delete committed by an application service produces one
//! `AuditEntry`, which is appended through the domain's `AuditRepository`
//! and mirrored as a structured `tracing` event on the `audit` target.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agrorural_audit::AuditPublisher;
//! use agrorural_application::AgroServices;
//! use agrorural_persistence::InMemoryStore;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let audit = Arc::new(AuditPublisher::new(store.clone()));
//! let services = AgroServices::new(store, audit);
//! ```
//!
//! Audit failures never undo the business operation; they are logged with
//! `tracing::warn!` and the entry is lost.

pub mod error;
pub mod publisher;

pub use error::{AuditError, AuditResult};
pub use publisher::{AuditPublisher, DEFAULT_ACTOR};

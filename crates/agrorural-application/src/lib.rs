//! AgroRural Application Layer
//!
//! Use cases over the domain: each service validates a command, checks the
//! cross-entity rules against the repositories, persists the result and
//! emits an application event.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Services            │ DTOs                   │ Events                  │
//! │  ─────────           │ ────                   │ ──────                  │
//! │  ProdutorService     │ CreateProdutorCommand  │ ApplicationEvent        │
//! │  PropriedadeService  │ ProdutorDto            │ EventPublisher          │
//! │  CulturaService      │ PropriedadeDto         │                         │
//! │  SafraService        │ CultivoDto             │                         │
//! │  CultivoService      │ DashboardDto           │                         │
//! │  DashboardService    │ AuditEntryDto          │                         │
//! │  AuditService        │ CascadeReportDto       │                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                     │
//! │  Entities, Value Objects, Business Rules, Repository Traits             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Responsibilities
//!
//! - **Use Case Orchestration**: existence checks, uniqueness, area sums
//! - **DTO Mapping**: identifiers cross the boundary as strings
//! - **Application Events**: one event per committed mutation
//! - **Error Mapping**: domain errors become [`ApplicationError`]
//!
//! Transactions stay inside the repositories: multi-row deletes are single
//! repository calls (`remove_cascade`).

pub mod dto;
pub mod errors;
pub mod events;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{ApplicationEvent, EventPublisher, InMemoryEventPublisher, NoOpEventPublisher};
pub use services::*;

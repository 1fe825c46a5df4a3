//! AgroRural Persistence Layer
//!
//! Infrastructure layer providing repository implementations for the domain.
//! This crate implements the repository interfaces defined in `agrorural-domain`.
//!
//! ## Features
//!
//! - **In-Memory Store**: Thread-safe in-memory implementation for testing and development
//! - **SQLite Store**: Persistent storage through sqlx with embedded migrations
//!
//! ## Architecture
//!
//! Infrastructure implements domain interfaces
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                    │  sqlite/                           │
//! │  ─────────                  │  ───────                           │
//! │  InMemoryStore              │  SqliteStore, connect()            │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │  ProdutorRepository, PropriedadeRepository, CulturaRepository,   │
//! │  SafraRepository, CultivoRepository, DashboardRepository,        │
//! │  AuditRepository                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both stores implement every trait, so either satisfies `AgroStore`.
//!
//! ## Usage
//!
//! ### In-Memory (Testing/Development)
//!
//! ```ignore
//! use agrorural_persistence::memory::InMemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::new());
//! ```
//!
//! ### SQLite (Production)
//!
//! ```ignore
//! use agrorural_persistence::sqlite::connect;
//! use std::sync::Arc;
//!
//! let store = Arc::new(connect("sqlite://agrorural.db").await?);
//! ```

pub mod error;

#[cfg(feature = "memory")]
pub mod memory;

// SQLite backend for production persistence
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::PersistenceError;

// Re-export commonly used types
#[cfg(feature = "memory")]
pub use memory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::{connect, SqliteStore};

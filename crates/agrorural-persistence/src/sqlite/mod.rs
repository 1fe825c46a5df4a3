//! SQLite Repository Implementations
//!
//! Production persistence using SQLite via sqlx.
//!
//! ## Usage
//!
//! ```ignore
//! use agrorural_persistence::sqlite::connect;
//! use agrorural_domain::repositories::CulturaRepository;
//! use std::sync::Arc;
//!
//! let store = Arc::new(connect("sqlite://agrorural.db").await?);
//! let culturas: Arc<dyn CulturaRepository> = store;
//! ```

mod audit_repository;
mod connection;
mod cultivo_repository;
mod cultura_repository;
mod dashboard_repository;
mod produtor_repository;
mod propriedade_repository;
mod records;
mod safra_repository;

pub use connection::{connect, is_memory_url, SqliteStore};

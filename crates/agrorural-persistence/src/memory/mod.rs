//! In-Memory Repository Implementations
//!
//! One [`InMemoryStore`] implements every repository trait. All tables sit
//! behind a single lock, so a cascade that holds the write guard is atomic.
//!
//! Memory backend for tests and local development

mod audit_repository;
mod cultivo_repository;
mod cultura_repository;
mod dashboard_repository;
mod produtor_repository;
mod propriedade_repository;
mod safra_repository;
mod store;

pub use store::InMemoryStore;

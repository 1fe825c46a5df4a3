//! AgroRural RESTful API
//!
//! Exposes producers, properties, crop types, seasons and plantings under
//! `/api/v1`, plus the dashboard and the audit trail. The OpenAPI document
//! is served at `/api-docs/openapi.json` and browsable at `/swagger-ui`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigLoader, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::all_routes;
pub use server::ApiServer;
pub use state::AppState;

//! Data Transfer Objects (DTOs) for layer boundary crossing
//!
//! DTOs prevent domain model leakage to the presentation layer.
//! Identifiers cross the boundary as strings and are parsed by the services.

pub mod audit;
pub mod cultivo;
pub mod cultura;
pub mod dashboard;
pub mod produtor;
pub mod propriedade;
pub mod safra;

// Re-export commonly used DTOs
pub use audit::*;
pub use cultivo::*;
pub use cultura::*;
pub use dashboard::*;
pub use produtor::*;
pub use propriedade::*;
pub use safra::*;

use agrorural_domain::repositories::CascadeReport;
use serde::{Deserialize, Serialize};

/// Rows removed by a cascading delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CascadeReportDto {
    pub produtores: u64,
    pub propriedades: u64,
    pub vinculos: u64,
    pub safras: u64,
    pub cultivos: u64,
}

impl From<CascadeReport> for CascadeReportDto {
    fn from(r: CascadeReport) -> Self {
        Self {
            produtores: r.produtores,
            propriedades: r.propriedades,
            vinculos: r.vinculos,
            safras: r.safras,
            cultivos: r.cultivos,
        }
    }
}

//! Cultura DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::Cultura;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCulturaCommand {
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCulturaCommand {
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CulturaDto {
    pub id: String,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CulturaDto {
    pub fn from_domain(cultura: &Cultura) -> Self {
        Self {
            id: cultura.id().to_string(),
            nome: cultura.nome().to_string(),
            created_at: cultura.created_at(),
            updated_at: cultura.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CulturaListDto {
    pub items: Vec<CulturaDto>,
    pub total: u64,
}

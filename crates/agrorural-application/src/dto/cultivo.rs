//! Cultivo DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::Cultivo;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateCultivoCommand {
    pub propriedade_id: String,
    pub cultura_id: String,
    pub safra_id: String,
    pub area_plantada: f64,
}

/// Partial update; property and season are fixed once planted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCultivoCommand {
    pub cultura_id: Option<String>,
    pub area_plantada: Option<f64>,
}

/// String filters as received from the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CultivoQuery {
    pub propriedade_id: Option<String>,
    pub safra_id: Option<String>,
    pub cultura_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CultivoDto {
    pub id: String,
    pub propriedade_id: String,
    pub cultura_id: String,
    pub safra_id: String,
    pub area_plantada: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CultivoDto {
    pub fn from_domain(cultivo: &Cultivo) -> Self {
        Self {
            id: cultivo.id().to_string(),
            propriedade_id: cultivo.propriedade_id().to_string(),
            cultura_id: cultivo.cultura_id().to_string(),
            safra_id: cultivo.safra_id().to_string(),
            area_plantada: cultivo.area_plantada().value(),
            created_at: cultivo.created_at(),
            updated_at: cultivo.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CultivoListDto {
    pub items: Vec<CultivoDto>,
    pub total: u64,
}

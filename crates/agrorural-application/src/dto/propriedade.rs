//! Propriedade Rural DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::{AreasPatch, PropriedadeRural};
use agrorural_domain::value_objects::ProdutorId;

/// Command to register a property; at least one owner is required
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePropriedadeCommand {
    pub nome: String,
    pub cidade: String,
    /// Two-letter federative unit, e.g. "MT"
    pub estado: String,
    pub area_total: f64,
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
    pub produtor_ids: Vec<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePropriedadeCommand {
    pub nome: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub area_total: Option<f64>,
    pub area_agricultavel: Option<f64>,
    pub area_vegetacao: Option<f64>,
    /// Replaces every owner link when present
    pub produtor_ids: Option<Vec<String>>,
}

impl UpdatePropriedadeCommand {
    pub fn areas_patch(&self) -> AreasPatch {
        AreasPatch {
            total: self.area_total,
            agricultavel: self.area_agricultavel,
            vegetacao: self.area_vegetacao,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PropriedadeDto {
    pub id: String,
    pub nome: String,
    pub cidade: String,
    pub estado: String,
    pub area_total: f64,
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
    pub produtor_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropriedadeDto {
    pub fn from_domain(propriedade: &PropriedadeRural, owners: &[ProdutorId]) -> Self {
        Self {
            id: propriedade.id().to_string(),
            nome: propriedade.nome().to_string(),
            cidade: propriedade.cidade().to_string(),
            estado: propriedade.estado().code().to_string(),
            area_total: propriedade.area_total().value(),
            area_agricultavel: propriedade.area_agricultavel().value(),
            area_vegetacao: propriedade.area_vegetacao().value(),
            produtor_ids: owners.iter().map(ToString::to_string).collect(),
            created_at: propriedade.created_at(),
            updated_at: propriedade.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PropriedadeListDto {
    pub items: Vec<PropriedadeDto>,
    pub total: u64,
}

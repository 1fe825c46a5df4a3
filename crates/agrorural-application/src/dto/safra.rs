//! Safra DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::Safra;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateSafraCommand {
    pub propriedade_id: String,
    pub ano: i32,
    pub descricao: Option<String>,
}

/// Partial update; an empty `descricao` clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateSafraCommand {
    pub ano: Option<i32>,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SafraDto {
    pub id: String,
    pub propriedade_id: String,
    pub ano: i32,
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SafraDto {
    pub fn from_domain(safra: &Safra) -> Self {
        Self {
            id: safra.id().to_string(),
            propriedade_id: safra.propriedade_id().to_string(),
            ano: safra.ano(),
            descricao: safra.descricao().map(str::to_string),
            created_at: safra.created_at(),
            updated_at: safra.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SafraListDto {
    pub items: Vec<SafraDto>,
    pub total: u64,
}

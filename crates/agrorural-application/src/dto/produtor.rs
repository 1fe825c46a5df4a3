//! Produtor DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::Produtor;
use agrorural_domain::value_objects::{DocumentoKind, PropriedadeId};

/// Command to register a producer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateProdutorCommand {
    /// CPF or CNPJ, punctuated or digits only
    pub documento: String,
    pub nome: String,
    /// Properties to link on creation
    #[serde(default)]
    pub propriedade_ids: Vec<String>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProdutorCommand {
    pub documento: Option<String>,
    pub nome: Option<String>,
    /// Replaces every ownership link when present
    pub propriedade_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProdutorDto {
    pub id: String,
    /// Digits only
    pub documento: String,
    pub documento_formatado: String,
    /// "CPF" or "CNPJ"
    pub tipo_documento: String,
    pub nome: String,
    pub propriedade_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProdutorDto {
    /// Create from domain aggregate and its ownership links
    pub fn from_domain(produtor: &Produtor, propriedades: &[PropriedadeId]) -> Self {
        let tipo = match produtor.documento().kind() {
            DocumentoKind::Cpf => "CPF",
            DocumentoKind::Cnpj => "CNPJ",
        };
        Self {
            id: produtor.id().to_string(),
            documento: produtor.documento().as_str().to_string(),
            documento_formatado: produtor.documento().formatted(),
            tipo_documento: tipo.to_string(),
            nome: produtor.nome().to_string(),
            propriedade_ids: propriedades.iter().map(ToString::to_string).collect(),
            created_at: produtor.created_at(),
            updated_at: produtor.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProdutorListDto {
    pub items: Vec<ProdutorDto>,
    pub total: u64,
}

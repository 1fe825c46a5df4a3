//! Propriedade Rural aggregate
//!
//! A farm with total, arable and vegetation areas. Invariants:
//! - `area_total > 0`
//! - `area_agricultavel + area_vegetacao <= area_total`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Hectares, PropriedadeId, Uf};

const TEXT_MAX: usize = 255;

/// The three areas of a property, validated together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Areas {
    pub total: Hectares,
    pub agricultavel: Hectares,
    pub vegetacao: Hectares,
}

impl Areas {
    pub fn new(total: f64, agricultavel: f64, vegetacao: f64) -> DomainResult<Self> {
        let total = Hectares::positive("area_total", total)?;
        let agricultavel = Hectares::new("area_agricultavel", agricultavel)?;
        let vegetacao = Hectares::new("area_vegetacao", vegetacao)?;

        if !(agricultavel + vegetacao).fits_within(total) {
            return Err(DomainError::rule(format!(
                "area_agricultavel ({}) + area_vegetacao ({}) exceeds area_total ({})",
                agricultavel.value(),
                vegetacao.value(),
                total.value()
            )));
        }

        Ok(Self {
            total,
            agricultavel,
            vegetacao,
        })
    }
}

/// Partial area change; unset fields keep their current value
#[derive(Debug, Clone, Copy, Default)]
pub struct AreasPatch {
    pub total: Option<f64>,
    pub agricultavel: Option<f64>,
    pub vegetacao: Option<f64>,
}

impl AreasPatch {
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.agricultavel.is_none() && self.vegetacao.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropriedadeRural {
    id: PropriedadeId,
    nome: String,
    cidade: String,
    estado: Uf,
    areas: Areas,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PropriedadeRural {
    pub fn create(nome: &str, cidade: &str, estado: &str, areas: Areas) -> DomainResult<Self> {
        let nome = validate_text("nome", nome, TEXT_MAX)?;
        let cidade = validate_text("cidade", cidade, TEXT_MAX)?;
        let estado: Uf = estado.parse()?;
        let now = Utc::now();

        Ok(Self {
            id: PropriedadeId::new(),
            nome,
            cidade,
            estado,
            areas,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PropriedadeId,
        nome: String,
        cidade: String,
        estado: Uf,
        areas: Areas,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            nome,
            cidade,
            estado,
            areas,
            created_at,
            updated_at,
        }
    }

    pub fn rename(&mut self, nome: &str) -> DomainResult<()> {
        self.nome = validate_text("nome", nome, TEXT_MAX)?;
        self.touch();
        Ok(())
    }

    pub fn relocate(&mut self, cidade: Option<&str>, estado: Option<&str>) -> DomainResult<()> {
        let cidade = cidade
            .map(|c| validate_text("cidade", c, TEXT_MAX))
            .transpose()?;
        let estado = estado.map(str::parse::<Uf>).transpose()?;

        if let Some(c) = cidade {
            self.cidade = c;
        }
        if let Some(e) = estado {
            self.estado = e;
        }
        self.touch();
        Ok(())
    }

    /// Compute the areas that would result from applying `patch`
    ///
    /// Does not mutate; callers check planted-area rules first and then
    /// call [`PropriedadeRural::set_areas`].
    pub fn preview_areas(&self, patch: AreasPatch) -> DomainResult<Areas> {
        Areas::new(
            patch.total.unwrap_or(self.areas.total.value()),
            patch.agricultavel.unwrap_or(self.areas.agricultavel.value()),
            patch.vegetacao.unwrap_or(self.areas.vegetacao.value()),
        )
    }

    pub fn set_areas(&mut self, areas: Areas) {
        self.areas = areas;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> PropriedadeId {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn cidade(&self) -> &str {
        &self.cidade
    }

    pub fn estado(&self) -> Uf {
        self.estado
    }

    pub fn areas(&self) -> Areas {
        self.areas
    }

    pub fn area_total(&self) -> Hectares {
        self.areas.total
    }

    pub fn area_agricultavel(&self) -> Hectares {
        self.areas.agricultavel
    }

    pub fn area_vegetacao(&self) -> Hectares {
        self.areas.vegetacao
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

//! Cultivo: planted area of one crop on one property in one season

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;
use crate::value_objects::{CultivoId, CulturaId, Hectares, PropriedadeId, SafraId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cultivo {
    id: CultivoId,
    propriedade_id: PropriedadeId,
    cultura_id: CulturaId,
    safra_id: SafraId,
    area_plantada: Hectares,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cultivo {
    pub fn create(
        propriedade_id: PropriedadeId,
        cultura_id: CulturaId,
        safra_id: SafraId,
        area_plantada: f64,
    ) -> DomainResult<Self> {
        let area_plantada = Hectares::positive("area_plantada", area_plantada)?;
        let now = Utc::now();
        Ok(Self {
            id: CultivoId::new(),
            propriedade_id,
            cultura_id,
            safra_id,
            area_plantada,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CultivoId,
        propriedade_id: PropriedadeId,
        cultura_id: CulturaId,
        safra_id: SafraId,
        area_plantada: Hectares,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            propriedade_id,
            cultura_id,
            safra_id,
            area_plantada,
            created_at,
            updated_at,
        }
    }

    pub fn set_area_plantada(&mut self, area: f64) -> DomainResult<()> {
        self.area_plantada = Hectares::positive("area_plantada", area)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_cultura(&mut self, cultura_id: CulturaId) {
        self.cultura_id = cultura_id;
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> CultivoId {
        self.id
    }

    pub fn propriedade_id(&self) -> PropriedadeId {
        self.propriedade_id
    }

    pub fn cultura_id(&self) -> CulturaId {
        self.cultura_id
    }

    pub fn safra_id(&self) -> SafraId {
        self.safra_id
    }

    pub fn area_plantada(&self) -> Hectares {
        self.area_plantada
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

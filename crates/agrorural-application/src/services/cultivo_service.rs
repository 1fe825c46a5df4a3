//! Cultivo Application Service
//!
//! Every write re-checks that the season's planted sum fits the
//! property's arable area. The check runs inside the repository write, so
//! concurrent plantings in one season are serialized by the backend.

use std::sync::Arc;

use tracing::info;

use agrorural_domain::entities::{Cultivo, EntityKind};
use agrorural_domain::repositories::{AgroStore, CultivoFilter, CultivoRepository, Page};
use agrorural_domain::value_objects::{CultivoId, CulturaId, PropriedadeId, SafraId};

use crate::dto::{
    CreateCultivoCommand, CultivoDto, CultivoListDto, CultivoQuery, UpdateCultivoCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};

pub struct CultivoService {
    cultivos: Arc<dyn CultivoRepository>,
    events: Arc<dyn EventPublisher>,
}

impl CultivoService {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            cultivos: store as Arc<dyn CultivoRepository>,
            events,
        }
    }

    /// Plant a crop on a property in one of its seasons
    pub async fn create(&self, cmd: CreateCultivoCommand) -> ApplicationResult<CultivoDto> {
        let propriedade_id = PropriedadeId::from_string(&cmd.propriedade_id)?;
        let cultura_id = CulturaId::from_string(&cmd.cultura_id)?;
        let safra_id = SafraId::from_string(&cmd.safra_id)?;
        let cultivo = Cultivo::create(propriedade_id, cultura_id, safra_id, cmd.area_plantada)?;

        self.cultivos.save(&cultivo).await?;

        let dto = CultivoDto::from_domain(&cultivo);
        info!(
            cultivo_id = %dto.id,
            safra_id = %dto.safra_id,
            area_plantada = dto.area_plantada,
            "cultivo created"
        );
        self.events
            .publish(ApplicationEvent::created(EntityKind::Cultivo, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    pub async fn find_all(
        &self,
        query: CultivoQuery,
        page: Page,
    ) -> ApplicationResult<CultivoListDto> {
        let filter = CultivoFilter {
            propriedade_id: query
                .propriedade_id
                .as_deref()
                .map(PropriedadeId::from_string)
                .transpose()?,
            safra_id: query
                .safra_id
                .as_deref()
                .map(SafraId::from_string)
                .transpose()?,
            cultura_id: query
                .cultura_id
                .as_deref()
                .map(CulturaId::from_string)
                .transpose()?,
        };

        let cultivos = self.cultivos.find_all(filter, page).await?;
        let total = self.cultivos.count(filter).await?;

        Ok(CultivoListDto {
            items: cultivos.iter().map(CultivoDto::from_domain).collect(),
            total,
        })
    }

    pub async fn find_one(&self, id: &str) -> ApplicationResult<CultivoDto> {
        let cultivo = self.load(id).await?;
        Ok(CultivoDto::from_domain(&cultivo))
    }

    /// Change crop and/or planted area; the cultivo's own area is left out
    /// of the season sum
    pub async fn update(
        &self,
        id: &str,
        cmd: UpdateCultivoCommand,
    ) -> ApplicationResult<CultivoDto> {
        let mut cultivo = self.load(id).await?;

        if let Some(raw) = cmd.cultura_id.as_deref() {
            cultivo.set_cultura(CulturaId::from_string(raw)?);
        }
        if let Some(area) = cmd.area_plantada {
            cultivo.set_area_plantada(area)?;
        }

        self.cultivos.save(&cultivo).await?;

        let dto = CultivoDto::from_domain(&cultivo);
        self.events
            .publish(ApplicationEvent::updated(EntityKind::Cultivo, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    pub async fn remove(&self, id: &str) -> ApplicationResult<()> {
        let cultivo = self.load(id).await?;

        if !self.cultivos.delete(&cultivo.id()).await? {
            return Err(ApplicationError::not_found("Cultivo", id));
        }

        info!(cultivo_id = %cultivo.id(), "cultivo removed");
        self.events
            .publish(ApplicationEvent::deleted(
                EntityKind::Cultivo,
                cultivo.id(),
                CultivoDto::from_domain(&cultivo),
            ))
            .await;

        Ok(())
    }

    async fn load(&self, id: &str) -> ApplicationResult<Cultivo> {
        let cultivo_id = CultivoId::from_string(id)?;
        self.cultivos
            .find_by_id(&cultivo_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Cultivo", id))
    }
}

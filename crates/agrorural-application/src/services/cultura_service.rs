//! Cultura Application Service
//!
//! Crop names are unique regardless of case.

use std::sync::Arc;

use tracing::info;

use agrorural_domain::entities::{Cultura, EntityKind};
use agrorural_domain::repositories::{AgroStore, CulturaRepository};
use agrorural_domain::value_objects::CulturaId;

use crate::dto::{CreateCulturaCommand, CulturaDto, CulturaListDto, UpdateCulturaCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};

pub struct CulturaService {
    culturas: Arc<dyn CulturaRepository>,
    events: Arc<dyn EventPublisher>,
}

impl CulturaService {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            culturas: store as Arc<dyn CulturaRepository>,
            events,
        }
    }

    pub async fn create(&self, cmd: CreateCulturaCommand) -> ApplicationResult<CulturaDto> {
        let cultura = Cultura::create(&cmd.nome)?;
        self.ensure_nome_free(&cultura).await?;

        self.culturas.save(&cultura).await?;

        let dto = CulturaDto::from_domain(&cultura);
        info!(cultura_id = %dto.id, nome = %dto.nome, "cultura created");
        self.events
            .publish(ApplicationEvent::created(EntityKind::Cultura, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    pub async fn find_all(&self) -> ApplicationResult<CulturaListDto> {
        let items: Vec<CulturaDto> = self
            .culturas
            .find_all()
            .await?
            .iter()
            .map(CulturaDto::from_domain)
            .collect();
        let total = items.len() as u64;
        Ok(CulturaListDto { items, total })
    }

    pub async fn find_one(&self, id: &str) -> ApplicationResult<CulturaDto> {
        let cultura = self.load(id).await?;
        Ok(CulturaDto::from_domain(&cultura))
    }

    pub async fn update(
        &self,
        id: &str,
        cmd: UpdateCulturaCommand,
    ) -> ApplicationResult<CulturaDto> {
        let mut cultura = self.load(id).await?;
        cultura.rename(&cmd.nome)?;
        self.ensure_nome_free(&cultura).await?;

        self.culturas.save(&cultura).await?;

        let dto = CulturaDto::from_domain(&cultura);
        self.events
            .publish(ApplicationEvent::updated(EntityKind::Cultura, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    /// Delete a crop that no cultivo references
    pub async fn remove(&self, id: &str) -> ApplicationResult<()> {
        let cultura = self.load(id).await?;

        if self.culturas.is_in_use(&cultura.id()).await? {
            return Err(ApplicationError::Conflict(format!(
                "cultura '{}' is referenced by cultivos",
                cultura.nome()
            )));
        }
        if !self.culturas.delete(&cultura.id()).await? {
            return Err(ApplicationError::not_found("Cultura", id));
        }

        info!(cultura_id = %cultura.id(), "cultura removed");
        self.events
            .publish(ApplicationEvent::deleted(
                EntityKind::Cultura,
                cultura.id(),
                CulturaDto::from_domain(&cultura),
            ))
            .await;

        Ok(())
    }

    async fn load(&self, id: &str) -> ApplicationResult<Cultura> {
        let cultura_id = CulturaId::from_string(id)?;
        self.culturas
            .find_by_id(&cultura_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Cultura", id))
    }

    async fn ensure_nome_free(&self, cultura: &Cultura) -> ApplicationResult<()> {
        match self.culturas.find_by_nome(cultura.nome()).await? {
            Some(existing) if existing.id() != cultura.id() => Err(ApplicationError::Conflict(
                format!("cultura '{}' already exists", existing.nome()),
            )),
            _ => Ok(()),
        }
    }
}

//! Safra Application Service
//!
//! A property has at most one safra per year.

use std::sync::Arc;

use tracing::info;

use agrorural_domain::entities::{EntityKind, Safra};
use agrorural_domain::repositories::{AgroStore, Page, PropriedadeRepository, SafraRepository};
use agrorural_domain::value_objects::{PropriedadeId, SafraId};

use crate::dto::{CascadeReportDto, CreateSafraCommand, SafraDto, SafraListDto, UpdateSafraCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};

pub struct SafraService {
    safras: Arc<dyn SafraRepository>,
    propriedades: Arc<dyn PropriedadeRepository>,
    events: Arc<dyn EventPublisher>,
}

impl SafraService {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            safras: Arc::clone(&store) as Arc<dyn SafraRepository>,
            propriedades: store as Arc<dyn PropriedadeRepository>,
            events,
        }
    }

    pub async fn create(&self, cmd: CreateSafraCommand) -> ApplicationResult<SafraDto> {
        let propriedade_id = PropriedadeId::from_string(&cmd.propriedade_id)?;
        let safra = Safra::create(propriedade_id, cmd.ano, cmd.descricao.as_deref())?;

        if self.propriedades.find_by_id(&propriedade_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "PropriedadeRural",
                &cmd.propriedade_id,
            ));
        }
        self.ensure_ano_free(&safra).await?;

        self.safras.save(&safra).await?;

        let dto = SafraDto::from_domain(&safra);
        info!(safra_id = %dto.id, ano = dto.ano, "safra created");
        self.events
            .publish(ApplicationEvent::created(EntityKind::Safra, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    /// List seasons, optionally restricted to one property
    pub async fn find_all(
        &self,
        propriedade_id: Option<&str>,
        page: Page,
    ) -> ApplicationResult<SafraListDto> {
        let propriedade = propriedade_id
            .map(PropriedadeId::from_string)
            .transpose()?;

        let safras = self.safras.find_all(propriedade.as_ref(), page).await?;
        let total = self.safras.count(propriedade.as_ref()).await?;

        Ok(SafraListDto {
            items: safras.iter().map(SafraDto::from_domain).collect(),
            total,
        })
    }

    pub async fn find_one(&self, id: &str) -> ApplicationResult<SafraDto> {
        let safra = self.load(id).await?;
        Ok(SafraDto::from_domain(&safra))
    }

    pub async fn update(&self, id: &str, cmd: UpdateSafraCommand) -> ApplicationResult<SafraDto> {
        let mut safra = self.load(id).await?;

        if let Some(ano) = cmd.ano {
            if ano != safra.ano() {
                safra.set_ano(ano)?;
                self.ensure_ano_free(&safra).await?;
            }
        }
        if let Some(descricao) = cmd.descricao.as_deref() {
            safra.set_descricao(Some(descricao))?;
        }

        self.safras.save(&safra).await?;

        let dto = SafraDto::from_domain(&safra);
        self.events
            .publish(ApplicationEvent::updated(EntityKind::Safra, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    /// Remove the season and every cultivo planted in it
    pub async fn remove(&self, id: &str) -> ApplicationResult<CascadeReportDto> {
        let safra = self.load(id).await?;
        let last_state = SafraDto::from_domain(&safra);

        let report = CascadeReportDto::from(self.safras.remove_cascade(&safra.id()).await?);

        info!(safra_id = %safra.id(), cultivos = report.cultivos, "safra removed");
        self.events
            .publish(ApplicationEvent::deleted(
                EntityKind::Safra,
                safra.id(),
                serde_json::json!({ "safra": last_state, "cascade": report }),
            ))
            .await;

        Ok(report)
    }

    async fn load(&self, id: &str) -> ApplicationResult<Safra> {
        let safra_id = SafraId::from_string(id)?;
        self.safras
            .find_by_id(&safra_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Safra", id))
    }

    async fn ensure_ano_free(&self, safra: &Safra) -> ApplicationResult<()> {
        match self
            .safras
            .find_by_propriedade_and_ano(&safra.propriedade_id(), safra.ano())
            .await?
        {
            Some(existing) if existing.id() != safra.id() => Err(ApplicationError::Conflict(
                format!(
                    "propriedade {} already has a safra for {}",
                    safra.propriedade_id(),
                    safra.ano()
                ),
            )),
            _ => Ok(()),
        }
    }
}

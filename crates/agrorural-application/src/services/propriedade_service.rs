//! Propriedade Rural Application Service

use std::sync::Arc;

use tracing::info;

use agrorural_domain::entities::{Areas, EntityKind, PropriedadeRural};
use agrorural_domain::repositories::{
    AgroStore, CultivoRepository, Page, ProdutorRepository, PropriedadeRepository,
};
use agrorural_domain::rules;
use agrorural_domain::value_objects::{ProdutorId, PropriedadeId};

use crate::dto::{
    CascadeReportDto, CreatePropriedadeCommand, PropriedadeDto, PropriedadeListDto,
    UpdatePropriedadeCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};
use crate::services::parse_ids;

pub struct PropriedadeService {
    propriedades: Arc<dyn PropriedadeRepository>,
    produtores: Arc<dyn ProdutorRepository>,
    cultivos: Arc<dyn CultivoRepository>,
    events: Arc<dyn EventPublisher>,
}

impl PropriedadeService {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            propriedades: Arc::clone(&store) as Arc<dyn PropriedadeRepository>,
            produtores: Arc::clone(&store) as Arc<dyn ProdutorRepository>,
            cultivos: store as Arc<dyn CultivoRepository>,
            events,
        }
    }

    /// Register a property owned by one or more existing producers
    pub async fn create(&self, cmd: CreatePropriedadeCommand) -> ApplicationResult<PropriedadeDto> {
        let areas = Areas::new(cmd.area_total, cmd.area_agricultavel, cmd.area_vegetacao)?;
        let propriedade = PropriedadeRural::create(&cmd.nome, &cmd.cidade, &cmd.estado, areas)?;
        let owners = self.resolve_owners(&cmd.produtor_ids).await?;

        self.propriedades
            .save_with_owners(&propriedade, &owners)
            .await?;

        let dto = PropriedadeDto::from_domain(&propriedade, &owners);
        info!(propriedade_id = %dto.id, estado = %dto.estado, "propriedade created");
        self.events
            .publish(ApplicationEvent::created(EntityKind::Propriedade, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    pub async fn find_all(&self, page: Page) -> ApplicationResult<PropriedadeListDto> {
        let propriedades = self.propriedades.find_all(page).await?;
        let total = self.propriedades.count().await?;

        let mut items = Vec::with_capacity(propriedades.len());
        for p in &propriedades {
            let owners = self.propriedades.owners_of(&p.id()).await?;
            items.push(PropriedadeDto::from_domain(p, &owners));
        }

        Ok(PropriedadeListDto { items, total })
    }

    pub async fn find_one(&self, id: &str) -> ApplicationResult<PropriedadeDto> {
        let propriedade = self.load(id).await?;
        let owners = self.propriedades.owners_of(&propriedade.id()).await?;
        Ok(PropriedadeDto::from_domain(&propriedade, &owners))
    }

    /// Apply a partial update
    ///
    /// New areas must keep the area invariant and still hold the largest
    /// planted season of the property. The storage backend repeats the check
    /// atomically with the write.
    pub async fn update(
        &self,
        id: &str,
        cmd: UpdatePropriedadeCommand,
    ) -> ApplicationResult<PropriedadeDto> {
        let mut propriedade = self.load(id).await?;

        if let Some(nome) = cmd.nome.as_deref() {
            propriedade.rename(nome)?;
        }
        if cmd.cidade.is_some() || cmd.estado.is_some() {
            propriedade.relocate(cmd.cidade.as_deref(), cmd.estado.as_deref())?;
        }

        let patch = cmd.areas_patch();
        if !patch.is_empty() {
            let areas = propriedade.preview_areas(patch)?;
            let max_planted = self
                .cultivos
                .max_planted_per_safra(&propriedade.id())
                .await?;
            rules::check_areas_cover_plantings(&areas, max_planted)?;
            propriedade.set_areas(areas);
        }

        let owners = match cmd.produtor_ids.as_deref() {
            Some(raw) => Some(self.resolve_owners(raw).await?),
            None => None,
        };

        let owners = match owners {
            Some(owners) => {
                self.propriedades
                    .save_with_owners(&propriedade, &owners)
                    .await?;
                owners
            }
            None => {
                self.propriedades.save(&propriedade).await?;
                self.propriedades.owners_of(&propriedade.id()).await?
            }
        };

        let dto = PropriedadeDto::from_domain(&propriedade, &owners);
        self.events
            .publish(ApplicationEvent::updated(EntityKind::Propriedade, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    /// Remove the property with its safras, cultivos and owner links
    pub async fn remove(&self, id: &str) -> ApplicationResult<CascadeReportDto> {
        let propriedade = self.load(id).await?;
        let owners = self.propriedades.owners_of(&propriedade.id()).await?;
        let last_state = PropriedadeDto::from_domain(&propriedade, &owners);

        let report = CascadeReportDto::from(
            self.propriedades
                .remove_cascade(&propriedade.id())
                .await?,
        );

        info!(
            propriedade_id = %propriedade.id(),
            safras = report.safras,
            cultivos = report.cultivos,
            "propriedade removed"
        );
        self.events
            .publish(ApplicationEvent::deleted(
                EntityKind::Propriedade,
                propriedade.id(),
                serde_json::json!({ "propriedade": last_state, "cascade": report }),
            ))
            .await;

        Ok(report)
    }

    async fn load(&self, id: &str) -> ApplicationResult<PropriedadeRural> {
        let propriedade_id = PropriedadeId::from_string(id)?;
        self.propriedades
            .find_by_id(&propriedade_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("PropriedadeRural", id))
    }

    async fn resolve_owners(&self, raw: &[String]) -> ApplicationResult<Vec<ProdutorId>> {
        let owners = parse_ids(raw, ProdutorId::from_string)?;
        if owners.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "produtor_ids: a propriedade needs at least one produtor".to_string(),
            ));
        }
        for owner in &owners {
            if self.produtores.find_by_id(owner).await?.is_none() {
                return Err(ApplicationError::not_found("Produtor", owner));
            }
        }
        Ok(owners)
    }
}

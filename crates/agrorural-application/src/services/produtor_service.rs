//! Produtor Application Service
//!
//! Registration, ownership links and the cascading removal of producers.

use std::sync::Arc;

use tracing::{debug, info};

use agrorural_domain::entities::{EntityKind, Produtor};
use agrorural_domain::repositories::{AgroStore, Page, ProdutorRepository, PropriedadeRepository};
use agrorural_domain::value_objects::{ProdutorId, PropriedadeId};

use crate::dto::{
    CascadeReportDto, CreateProdutorCommand, ProdutorDto, ProdutorListDto, UpdateProdutorCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};
use crate::services::parse_ids;

pub struct ProdutorService {
    produtores: Arc<dyn ProdutorRepository>,
    propriedades: Arc<dyn PropriedadeRepository>,
    events: Arc<dyn EventPublisher>,
}

impl ProdutorService {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            produtores: Arc::clone(&store) as Arc<dyn ProdutorRepository>,
            propriedades: store as Arc<dyn PropriedadeRepository>,
            events,
        }
    }

    /// Register a producer, optionally linking existing properties
    pub async fn create(&self, cmd: CreateProdutorCommand) -> ApplicationResult<ProdutorDto> {
        let produtor = Produtor::create(&cmd.documento, &cmd.nome)?;
        self.ensure_documento_free(&produtor, None).await?;

        let propriedades = self.resolve_propriedades(&cmd.propriedade_ids).await?;

        if propriedades.is_empty() {
            self.produtores.save(&produtor).await?;
        } else {
            self.produtores
                .save_with_propriedades(&produtor, &propriedades)
                .await?;
        }

        let dto = ProdutorDto::from_domain(&produtor, &propriedades);
        info!(produtor_id = %dto.id, "produtor created");
        self.events
            .publish(ApplicationEvent::created(EntityKind::Produtor, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    pub async fn find_all(&self, page: Page) -> ApplicationResult<ProdutorListDto> {
        let produtores = self.produtores.find_all(page).await?;
        let total = self.produtores.count().await?;

        let mut items = Vec::with_capacity(produtores.len());
        for p in &produtores {
            let links = self.produtores.propriedades_of(&p.id()).await?;
            items.push(ProdutorDto::from_domain(p, &links));
        }

        Ok(ProdutorListDto { items, total })
    }

    pub async fn find_one(&self, id: &str) -> ApplicationResult<ProdutorDto> {
        let produtor = self.load(id).await?;
        let links = self.produtores.propriedades_of(&produtor.id()).await?;
        Ok(ProdutorDto::from_domain(&produtor, &links))
    }

    /// Update name, document and/or ownership links
    ///
    /// Unlinking a property is refused when the producer is its last owner;
    /// the storage backend checks this inside the write.
    pub async fn update(
        &self,
        id: &str,
        cmd: UpdateProdutorCommand,
    ) -> ApplicationResult<ProdutorDto> {
        let mut produtor = self.load(id).await?;

        if let Some(nome) = cmd.nome.as_deref() {
            produtor.rename(nome)?;
        }
        if let Some(documento) = cmd.documento.as_deref() {
            produtor.change_documento(documento)?;
            self.ensure_documento_free(&produtor, Some(produtor.id()))
                .await?;
        }

        let links = match cmd.propriedade_ids.as_deref() {
            Some(raw) => {
                let wanted = self.resolve_propriedades(raw).await?;
                self.produtores
                    .save_with_propriedades(&produtor, &wanted)
                    .await?;
                wanted
            }
            None => {
                self.produtores.save(&produtor).await?;
                self.produtores.propriedades_of(&produtor.id()).await?
            }
        };
        let dto = ProdutorDto::from_domain(&produtor, &links);
        self.events
            .publish(ApplicationEvent::updated(EntityKind::Produtor, &dto.id, &dto))
            .await;

        Ok(dto)
    }

    /// Remove a producer and everything only it owned
    ///
    /// Properties with no remaining owner are deleted together with their
    /// safras and cultivos; properties shared with other producers only lose
    /// the link. The storage backend runs the whole cascade in one
    /// transaction.
    pub async fn remove(&self, id: &str) -> ApplicationResult<CascadeReportDto> {
        let produtor = self.load(id).await?;
        let links = self.produtores.propriedades_of(&produtor.id()).await?;
        let last_state = ProdutorDto::from_domain(&produtor, &links);

        let report = self.produtores.remove_cascade(&produtor.id()).await?;
        let report = CascadeReportDto::from(report);

        info!(
            produtor_id = %produtor.id(),
            propriedades = report.propriedades,
            safras = report.safras,
            cultivos = report.cultivos,
            "produtor removed"
        );
        self.events
            .publish(ApplicationEvent::deleted(
                EntityKind::Produtor,
                produtor.id(),
                serde_json::json!({ "produtor": last_state, "cascade": report }),
            ))
            .await;

        Ok(report)
    }

    async fn load(&self, id: &str) -> ApplicationResult<Produtor> {
        let produtor_id = ProdutorId::from_string(id)?;
        self.produtores
            .find_by_id(&produtor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Produtor", id))
    }

    async fn ensure_documento_free(
        &self,
        produtor: &Produtor,
        owner: Option<ProdutorId>,
    ) -> ApplicationResult<()> {
        if let Some(existing) = self
            .produtores
            .find_by_documento(produtor.documento())
            .await?
        {
            if Some(existing.id()) != owner {
                return Err(ApplicationError::Conflict(format!(
                    "documento {} is already registered",
                    produtor.documento().formatted()
                )));
            }
        }
        Ok(())
    }

    async fn resolve_propriedades(&self, raw: &[String]) -> ApplicationResult<Vec<PropriedadeId>> {
        let ids = parse_ids(raw, PropriedadeId::from_string)?;
        for id in &ids {
            if self.propriedades.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::not_found("PropriedadeRural", id));
            }
        }
        debug!(count = ids.len(), "propriedades resolved");
        Ok(ids)
    }
}

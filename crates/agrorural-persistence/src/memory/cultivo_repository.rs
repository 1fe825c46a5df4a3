//! In-Memory Cultivo Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::Cultivo,
    errors::{DomainError, DomainResult},
    repositories::{CultivoFilter, CultivoRepository, Page},
    rules,
    value_objects::{CultivoId, Hectares, PropriedadeId, SafraId},
};

use super::InMemoryStore;

#[async_trait]
impl CultivoRepository for InMemoryStore {
    async fn save(&self, cultivo: &Cultivo) -> DomainResult<()> {
        let mut tables = self.tables.write();
        let propriedade = tables
            .propriedades
            .get(&cultivo.propriedade_id())
            .ok_or_else(|| DomainError::not_found("PropriedadeRural", cultivo.propriedade_id()))?;
        if !tables.culturas.contains_key(&cultivo.cultura_id()) {
            return Err(DomainError::not_found("Cultura", cultivo.cultura_id()));
        }
        let safra = tables
            .safras
            .get(&cultivo.safra_id())
            .ok_or_else(|| DomainError::not_found("Safra", cultivo.safra_id()))?;

        let planted = tables.planted_area(&safra.id(), Some(&cultivo.id()));
        rules::check_planting(propriedade, safra, planted, cultivo.area_plantada())?;

        tables.cultivos.insert(cultivo.id(), cultivo.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CultivoId) -> DomainResult<Option<Cultivo>> {
        Ok(self.tables.read().cultivos.get(id).cloned())
    }

    async fn find_all(&self, filter: CultivoFilter, page: Page) -> DomainResult<Vec<Cultivo>> {
        let mut found: Vec<Cultivo> = self
            .tables
            .read()
            .cultivos
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(page.slice(found))
    }

    async fn count(&self, filter: CultivoFilter) -> DomainResult<u64> {
        let tables = self.tables.read();
        Ok(tables.cultivos.values().filter(|c| filter.matches(c)).count() as u64)
    }

    async fn planted_area(
        &self,
        safra: &SafraId,
        excluding: Option<&CultivoId>,
    ) -> DomainResult<Hectares> {
        Ok(self.tables.read().planted_area(safra, excluding))
    }

    async fn max_planted_per_safra(&self, propriedade: &PropriedadeId) -> DomainResult<Hectares> {
        self.tables.read().max_planted_per_safra(propriedade)
    }

    async fn delete(&self, id: &CultivoId) -> DomainResult<bool> {
        Ok(self.tables.write().cultivos.remove(id).is_some())
    }
}

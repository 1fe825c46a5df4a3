//! In-Memory Propriedade Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::PropriedadeRural,
    errors::{DomainError, DomainResult},
    repositories::{CascadeReport, Page, PropriedadeRepository},
    value_objects::{ProdutorId, PropriedadeId},
};

use super::InMemoryStore;

#[async_trait]
impl PropriedadeRepository for InMemoryStore {
    async fn save(&self, propriedade: &PropriedadeRural) -> DomainResult<()> {
        let mut tables = self.tables.write();
        tables.check_covers_plantings(propriedade)?;
        tables
            .propriedades
            .insert(propriedade.id(), propriedade.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PropriedadeId) -> DomainResult<Option<PropriedadeRural>> {
        Ok(self.tables.read().propriedades.get(id).cloned())
    }

    async fn find_all(&self, page: Page) -> DomainResult<Vec<PropriedadeRural>> {
        let mut all: Vec<PropriedadeRural> =
            self.tables.read().propriedades.values().cloned().collect();
        all.sort_by(|a, b| a.nome().cmp(b.nome()).then_with(|| a.id().cmp(&b.id())));
        Ok(page.slice(all))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.tables.read().propriedades.len() as u64)
    }

    async fn owners_of(&self, id: &PropriedadeId) -> DomainResult<Vec<ProdutorId>> {
        Ok(self.tables.read().owners_of(id))
    }

    async fn save_with_owners(
        &self,
        propriedade: &PropriedadeRural,
        owners: &[ProdutorId],
    ) -> DomainResult<()> {
        if owners.is_empty() {
            return Err(DomainError::validation(
                "produtor_ids",
                "a propriedade needs at least one produtor",
            ));
        }

        let id = propriedade.id();
        let mut tables = self.tables.write();
        if let Some(missing) = owners.iter().find(|o| !tables.produtores.contains_key(*o)) {
            return Err(DomainError::not_found("Produtor", missing));
        }
        tables.check_covers_plantings(propriedade)?;

        tables.propriedades.insert(id, propriedade.clone());
        tables.vinculos.retain(|(_, p)| *p != id);
        tables.vinculos.extend(owners.iter().map(|o| (*o, id)));
        Ok(())
    }

    async fn remove_cascade(&self, id: &PropriedadeId) -> DomainResult<CascadeReport> {
        let mut tables = self.tables.write();
        if !tables.propriedades.contains_key(id) {
            return Err(DomainError::not_found("PropriedadeRural", id));
        }
        Ok(tables.remove_propriedade(id))
    }
}

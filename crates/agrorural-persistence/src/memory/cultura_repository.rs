//! In-Memory Cultura Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::{cultura::normalize_nome, Cultura},
    errors::{DomainError, DomainResult},
    repositories::CulturaRepository,
    value_objects::CulturaId,
};

use super::InMemoryStore;

#[async_trait]
impl CulturaRepository for InMemoryStore {
    async fn save(&self, cultura: &Cultura) -> DomainResult<()> {
        let mut tables = self.tables.write();
        let key = cultura.normalized_nome();
        let taken = tables
            .culturas
            .values()
            .any(|c| c.normalized_nome() == key && c.id() != cultura.id());
        if taken {
            return Err(DomainError::conflict(
                "Cultura",
                format!("'{}' already exists", cultura.nome()),
            ));
        }
        tables.culturas.insert(cultura.id(), cultura.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CulturaId) -> DomainResult<Option<Cultura>> {
        Ok(self.tables.read().culturas.get(id).cloned())
    }

    async fn find_by_nome(&self, nome: &str) -> DomainResult<Option<Cultura>> {
        let key = normalize_nome(nome);
        Ok(self
            .tables
            .read()
            .culturas
            .values()
            .find(|c| c.normalized_nome() == key)
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Cultura>> {
        let mut all: Vec<Cultura> = self.tables.read().culturas.values().cloned().collect();
        all.sort_by(|a, b| {
            a.normalized_nome()
                .cmp(&b.normalized_nome())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(all)
    }

    async fn is_in_use(&self, id: &CulturaId) -> DomainResult<bool> {
        Ok(self
            .tables
            .read()
            .cultivos
            .values()
            .any(|c| c.cultura_id() == *id))
    }

    async fn delete(&self, id: &CulturaId) -> DomainResult<bool> {
        let mut tables = self.tables.write();
        if tables.cultivos.values().any(|c| c.cultura_id() == *id) {
            return Err(DomainError::conflict("Cultura", "referenced by cultivos"));
        }
        Ok(tables.culturas.remove(id).is_some())
    }
}

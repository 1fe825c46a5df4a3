//! In-Memory Produtor Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    errors::{DomainError, DomainResult},
    entities::Produtor,
    repositories::{CascadeReport, Page, ProdutorRepository},
    value_objects::{Documento, ProdutorId, PropriedadeId},
};

use super::InMemoryStore;

#[async_trait]
impl ProdutorRepository for InMemoryStore {
    async fn save(&self, produtor: &Produtor) -> DomainResult<()> {
        let mut tables = self.tables.write();
        tables.check_documento_free(produtor)?;
        tables.produtores.insert(produtor.id(), produtor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProdutorId) -> DomainResult<Option<Produtor>> {
        Ok(self.tables.read().produtores.get(id).cloned())
    }

    async fn find_by_documento(&self, documento: &Documento) -> DomainResult<Option<Produtor>> {
        let tables = self.tables.read();
        Ok(tables
            .produtores
            .values()
            .find(|p| p.documento() == documento)
            .cloned())
    }

    async fn find_all(&self, page: Page) -> DomainResult<Vec<Produtor>> {
        let mut all: Vec<Produtor> = self.tables.read().produtores.values().cloned().collect();
        all.sort_by(|a, b| a.nome().cmp(b.nome()).then_with(|| a.id().cmp(&b.id())));
        Ok(page.slice(all))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.tables.read().produtores.len() as u64)
    }

    async fn propriedades_of(&self, id: &ProdutorId) -> DomainResult<Vec<PropriedadeId>> {
        Ok(self.tables.read().propriedades_of(id))
    }

    async fn save_with_propriedades(
        &self,
        produtor: &Produtor,
        propriedades: &[PropriedadeId],
    ) -> DomainResult<()> {
        let id = produtor.id();
        let mut tables = self.tables.write();
        tables.check_documento_free(produtor)?;
        if let Some(missing) = propriedades
            .iter()
            .find(|p| !tables.propriedades.contains_key(*p))
        {
            return Err(DomainError::not_found("PropriedadeRural", missing));
        }
        for dropped in tables
            .propriedades_of(&id)
            .iter()
            .filter(|p| !propriedades.contains(p))
        {
            if tables.owners_of(dropped).iter().all(|o| *o == id) {
                return Err(DomainError::rule(format!(
                    "propriedade {} would be left without owners",
                    dropped
                )));
            }
        }

        tables.produtores.insert(id, produtor.clone());
        tables.vinculos.retain(|(o, _)| *o != id);
        tables.vinculos.extend(propriedades.iter().map(|p| (id, *p)));
        Ok(())
    }

    async fn remove_cascade(&self, id: &ProdutorId) -> DomainResult<CascadeReport> {
        let mut tables = self.tables.write();
        if tables.produtores.remove(id).is_none() {
            return Err(DomainError::not_found("Produtor", id));
        }

        let mut report = CascadeReport {
            produtores: 1,
            ..Default::default()
        };

        let linked = tables.propriedades_of(id);
        let before = tables.vinculos.len();
        tables.vinculos.retain(|(o, _)| o != id);
        report.vinculos = (before - tables.vinculos.len()) as u64;

        for propriedade in linked {
            if tables.owners_of(&propriedade).is_empty() {
                report += tables.remove_propriedade(&propriedade);
            }
        }

        Ok(report)
    }
}

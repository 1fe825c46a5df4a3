//! In-Memory Safra Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::Safra,
    errors::{DomainError, DomainResult},
    repositories::{CascadeReport, Page, SafraRepository},
    value_objects::{PropriedadeId, SafraId},
};

use super::InMemoryStore;

#[async_trait]
impl SafraRepository for InMemoryStore {
    async fn save(&self, safra: &Safra) -> DomainResult<()> {
        let mut tables = self.tables.write();
        if !tables.propriedades.contains_key(&safra.propriedade_id()) {
            return Err(DomainError::not_found("PropriedadeRural", safra.propriedade_id()));
        }
        let taken = tables.safras.values().any(|s| {
            s.propriedade_id() == safra.propriedade_id()
                && s.ano() == safra.ano()
                && s.id() != safra.id()
        });
        if taken {
            return Err(DomainError::conflict(
                "Safra",
                format!("{} already exists for this propriedade", safra.ano()),
            ));
        }
        tables.safras.insert(safra.id(), safra.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SafraId) -> DomainResult<Option<Safra>> {
        Ok(self.tables.read().safras.get(id).cloned())
    }

    async fn find_by_propriedade(&self, propriedade: &PropriedadeId) -> DomainResult<Vec<Safra>> {
        let mut found: Vec<Safra> = self
            .tables
            .read()
            .safras
            .values()
            .filter(|s| s.propriedade_id() == *propriedade)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.ano());
        Ok(found)
    }

    async fn find_by_propriedade_and_ano(
        &self,
        propriedade: &PropriedadeId,
        ano: i32,
    ) -> DomainResult<Option<Safra>> {
        Ok(self
            .tables
            .read()
            .safras
            .values()
            .find(|s| s.propriedade_id() == *propriedade && s.ano() == ano)
            .cloned())
    }

    async fn find_all(
        &self,
        propriedade: Option<&PropriedadeId>,
        page: Page,
    ) -> DomainResult<Vec<Safra>> {
        let mut all: Vec<Safra> = self
            .tables
            .read()
            .safras
            .values()
            .filter(|s| propriedade.map_or(true, |p| s.propriedade_id() == *p))
            .cloned()
            .collect();
        all.sort_by(|a, b| b.ano().cmp(&a.ano()).then_with(|| a.id().cmp(&b.id())));
        Ok(page.slice(all))
    }

    async fn count(&self, propriedade: Option<&PropriedadeId>) -> DomainResult<u64> {
        let tables = self.tables.read();
        let n = tables
            .safras
            .values()
            .filter(|s| propriedade.map_or(true, |p| s.propriedade_id() == *p))
            .count();
        Ok(n as u64)
    }

    async fn remove_cascade(&self, id: &SafraId) -> DomainResult<CascadeReport> {
        let mut tables = self.tables.write();
        if !tables.safras.contains_key(id) {
            return Err(DomainError::not_found("Safra", id));
        }
        Ok(tables.remove_safra(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrorural_domain::entities::{Areas, PropriedadeRural};
    use agrorural_domain::repositories::PropriedadeRepository;

    async fn store_with_fazenda() -> (InMemoryStore, PropriedadeRural) {
        let store = InMemoryStore::new();
        let p = PropriedadeRural::create(
            "Fazenda",
            "Cascavel",
            "PR",
            Areas::new(80.0, 60.0, 10.0).unwrap(),
        )
        .unwrap();
        PropriedadeRepository::save(&store, &p).await.unwrap();
        (store, p)
    }

    #[tokio::test]
    async fn test_one_safra_per_year() {
        let (store, p) = store_with_fazenda().await;
        SafraRepository::save(&store, &Safra::create(p.id(), 2024, None).unwrap())
            .await
            .unwrap();
        let err = SafraRepository::save(&store, &Safra::create(p.id(), 2024, None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_find_all_newest_first_with_filter() {
        let (store, p) = store_with_fazenda().await;
        for ano in [2021, 2023, 2022] {
            SafraRepository::save(&store, &Safra::create(p.id(), ano, None).unwrap())
                .await
                .unwrap();
        }

        let all = SafraRepository::find_all(&store, Some(&p.id()), Page::default())
            .await
            .unwrap();
        let anos: Vec<i32> = all.iter().map(|s| s.ano()).collect();
        assert_eq!(anos, vec![2023, 2022, 2021]);

        let other = PropriedadeId::new();
        assert_eq!(SafraRepository::count(&store, Some(&other)).await.unwrap(), 0);
        assert_eq!(SafraRepository::count(&store, None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_save_requires_propriedade() {
        let store = InMemoryStore::new();
        let orphan = Safra::create(PropriedadeId::new(), 2024, None).unwrap();
        let err = SafraRepository::save(&store, &orphan).await.unwrap_err();
        assert!(matches!(err, DomainError::EntityNotFound { .. }));
    }
}

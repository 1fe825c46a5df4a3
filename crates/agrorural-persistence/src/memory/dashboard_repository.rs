//! In-Memory Dashboard Read Model

use async_trait::async_trait;
use std::collections::BTreeMap;

use agrorural_domain::{
    dashboard::DashboardSnapshot, errors::DomainResult, repositories::DashboardRepository,
    value_objects::Uf,
};

use super::InMemoryStore;

#[async_trait]
impl DashboardRepository for InMemoryStore {
    async fn snapshot(&self) -> DomainResult<DashboardSnapshot> {
        let tables = self.tables.read();

        let mut por_estado: BTreeMap<Uf, u64> = BTreeMap::new();
        let mut snapshot = DashboardSnapshot::default();
        for p in tables.propriedades.values() {
            snapshot.total_fazendas += 1;
            snapshot.total_hectares += p.area_total().value();
            snapshot.area_agricultavel += p.area_agricultavel().value();
            snapshot.area_vegetacao += p.area_vegetacao().value();
            *por_estado.entry(p.estado()).or_default() += 1;
        }
        snapshot.fazendas_por_estado = por_estado.into_iter().collect();

        let mut por_cultura: BTreeMap<String, (f64, u64)> = BTreeMap::new();
        for c in tables.cultivos.values() {
            let Some(cultura) = tables.culturas.get(&c.cultura_id()) else {
                continue;
            };
            let entry = por_cultura.entry(cultura.nome().to_string()).or_default();
            entry.0 += c.area_plantada().value();
            entry.1 += 1;
        }
        snapshot.area_por_cultura = por_cultura
            .into_iter()
            .map(|(nome, (area, n))| (nome, area, n))
            .collect();

        Ok(snapshot)
    }
}

//! Shared table storage for the in-memory backend

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use agrorural_domain::{
    entities::{AuditEntry, Cultivo, Cultura, Produtor, PropriedadeRural, Safra},
    errors::{DomainError, DomainResult},
    repositories::CascadeReport,
    rules,
    value_objects::{CultivoId, CulturaId, Hectares, ProdutorId, PropriedadeId, SafraId},
};

/// Thread-safe in-memory implementation of every repository trait
///
/// Uses one RwLock for concurrent read access with exclusive write access.
/// Stores cloned entities to maintain isolation.
///
/// # Example
///
/// ```ignore
/// use agrorural_persistence::memory::InMemoryStore;
/// use agrorural_application::{AgroServices, NoOpEventPublisher};
/// use std::sync::Arc;
///
/// let services = AgroServices::new(Arc::new(InMemoryStore::new()), Arc::new(NoOpEventPublisher));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(super) tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub produtores: HashMap<ProdutorId, Produtor>,
    pub propriedades: HashMap<PropriedadeId, PropriedadeRural>,
    /// produtor_propriedade join rows
    pub vinculos: BTreeSet<(ProdutorId, PropriedadeId)>,
    pub culturas: HashMap<CulturaId, Cultura>,
    pub safras: HashMap<SafraId, Safra>,
    pub cultivos: HashMap<CultivoId, Cultivo>,
    pub auditoria: Vec<AuditEntry>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all entity tables (for testing)
    pub fn row_count(&self) -> usize {
        let t = self.tables.read();
        t.produtores.len()
            + t.propriedades.len()
            + t.vinculos.len()
            + t.culturas.len()
            + t.safras.len()
            + t.cultivos.len()
    }

    /// Drop every row, audit trail included (for testing)
    pub fn clear(&self) {
        *self.tables.write() = Tables::default();
    }
}

impl Tables {
    pub fn owners_of(&self, propriedade: &PropriedadeId) -> Vec<ProdutorId> {
        self.vinculos
            .iter()
            .filter(|(_, p)| p == propriedade)
            .map(|(o, _)| *o)
            .collect()
    }

    pub fn propriedades_of(&self, produtor: &ProdutorId) -> Vec<PropriedadeId> {
        self.vinculos
            .range((*produtor, PropriedadeId::from_uuid(uuid::Uuid::nil()))..)
            .take_while(|(o, _)| o == produtor)
            .map(|(_, p)| *p)
            .collect()
    }

    /// Planted sum of one season, optionally ignoring one cultivo
    pub fn planted_area(&self, safra: &SafraId, excluding: Option<&CultivoId>) -> Hectares {
        self.cultivos
            .values()
            .filter(|c| c.safra_id() == *safra && Some(&c.id()) != excluding)
            .map(Cultivo::area_plantada)
            .sum()
    }

    pub fn max_planted_per_safra(&self, propriedade: &PropriedadeId) -> DomainResult<Hectares> {
        let mut per_safra: HashMap<SafraId, f64> = HashMap::new();
        for c in self
            .cultivos
            .values()
            .filter(|c| c.propriedade_id() == *propriedade)
        {
            *per_safra.entry(c.safra_id()).or_default() += c.area_plantada().value();
        }
        let max = per_safra.into_values().fold(0.0_f64, f64::max);
        Hectares::new("area_plantada", max)
    }

    /// Refuse areas that no longer hold the largest planted season
    pub fn check_covers_plantings(&self, propriedade: &PropriedadeRural) -> DomainResult<()> {
        let max_planted = self.max_planted_per_safra(&propriedade.id())?;
        rules::check_areas_cover_plantings(&propriedade.areas(), max_planted)
    }

    pub fn check_documento_free(&self, produtor: &Produtor) -> DomainResult<()> {
        let taken = self
            .produtores
            .values()
            .any(|p| p.documento() == produtor.documento() && p.id() != produtor.id());
        if taken {
            return Err(DomainError::conflict(
                "Produtor",
                format!("documento {} is already registered", produtor.documento()),
            ));
        }
        Ok(())
    }

    /// Delete a season and its cultivos
    pub fn remove_safra(&mut self, id: &SafraId) -> CascadeReport {
        let mut report = CascadeReport::default();
        if self.safras.remove(id).is_none() {
            return report;
        }
        report.safras = 1;

        let before = self.cultivos.len();
        self.cultivos.retain(|_, c| c.safra_id() != *id);
        report.cultivos = (before - self.cultivos.len()) as u64;
        report
    }

    /// Delete a property with its links, seasons and cultivos
    pub fn remove_propriedade(&mut self, id: &PropriedadeId) -> CascadeReport {
        let mut report = CascadeReport::default();
        if self.propriedades.remove(id).is_none() {
            return report;
        }
        report.propriedades = 1;

        let before = self.cultivos.len();
        self.cultivos.retain(|_, c| c.propriedade_id() != *id);
        report.cultivos = (before - self.cultivos.len()) as u64;

        let before = self.safras.len();
        self.safras.retain(|_, s| s.propriedade_id() != *id);
        report.safras = (before - self.safras.len()) as u64;

        let before = self.vinculos.len();
        self.vinculos.retain(|(_, p)| p != id);
        report.vinculos = (before - self.vinculos.len()) as u64;

        report
    }
}

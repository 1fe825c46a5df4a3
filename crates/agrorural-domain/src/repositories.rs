//! Repository interfaces for data persistence
//!
//! The domain layer defines only the contracts; `agrorural-persistence`
//! provides the in-memory and SQLite implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    dashboard::DashboardSnapshot,
    entities::{AuditEntry, AuditFilter, Cultivo, Cultura, Produtor, PropriedadeRural, Safra},
    errors::DomainResult,
    value_objects::*,
};

/// Default page size for list operations
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Hard upper bound on page size
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// Build a page, clamping the limit to `1..=MAX_PAGE_LIMIT`
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// Apply the page to an already sorted vector
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Rows removed by a cascading delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub produtores: u64,
    pub propriedades: u64,
    pub vinculos: u64,
    pub safras: u64,
    pub cultivos: u64,
}

impl std::ops::AddAssign for CascadeReport {
    fn add_assign(&mut self, rhs: Self) {
        self.produtores += rhs.produtores;
        self.propriedades += rhs.propriedades;
        self.vinculos += rhs.vinculos;
        self.safras += rhs.safras;
        self.cultivos += rhs.cultivos;
    }
}

/// Filter for cultivo listings; `None` matches anything
#[derive(Debug, Clone, Copy, Default)]
pub struct CultivoFilter {
    pub propriedade_id: Option<PropriedadeId>,
    pub safra_id: Option<SafraId>,
    pub cultura_id: Option<CulturaId>,
}

impl CultivoFilter {
    pub fn matches(&self, cultivo: &Cultivo) -> bool {
        self.propriedade_id
            .map_or(true, |id| id == cultivo.propriedade_id())
            && self.safra_id.map_or(true, |id| id == cultivo.safra_id())
            && self.cultura_id.map_or(true, |id| id == cultivo.cultura_id())
    }
}

/// Repository for producers and their ownership links
#[async_trait]
pub trait ProdutorRepository: Send + Sync {
    /// Insert or update a producer
    async fn save(&self, produtor: &Produtor) -> DomainResult<()>;

    async fn find_by_id(&self, id: &ProdutorId) -> DomainResult<Option<Produtor>>;

    async fn find_by_documento(&self, documento: &Documento) -> DomainResult<Option<Produtor>>;

    /// Producers ordered by name, then id
    async fn find_all(&self, page: Page) -> DomainResult<Vec<Produtor>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Properties linked to the producer
    async fn propriedades_of(&self, id: &ProdutorId) -> DomainResult<Vec<PropriedadeId>>;

    /// Insert or update the producer and replace its ownership links in one
    /// transaction
    ///
    /// Fails with `EntityNotFound` for an unknown property and with
    /// `BusinessRuleViolation` when an unlinked property would be left
    /// without owners. Nothing is written on failure.
    async fn save_with_propriedades(
        &self,
        produtor: &Produtor,
        propriedades: &[PropriedadeId],
    ) -> DomainResult<()>;

    /// Remove the producer together with every property left without an
    /// owner, and those properties' safras and cultivos, in one transaction
    async fn remove_cascade(&self, id: &ProdutorId) -> DomainResult<CascadeReport>;
}

/// Repository for rural properties
#[async_trait]
pub trait PropriedadeRepository: Send + Sync {
    /// Insert or update a property, keeping its owner links
    ///
    /// Fails with `BusinessRuleViolation` when `area_agricultavel` would drop
    /// below a season already planted; the check and the write are atomic.
    async fn save(&self, propriedade: &PropriedadeRural) -> DomainResult<()>;

    async fn find_by_id(&self, id: &PropriedadeId) -> DomainResult<Option<PropriedadeRural>>;

    /// Properties ordered by name, then id
    async fn find_all(&self, page: Page) -> DomainResult<Vec<PropriedadeRural>>;

    async fn count(&self) -> DomainResult<u64>;

    async fn owners_of(&self, id: &PropriedadeId) -> DomainResult<Vec<ProdutorId>>;

    /// Insert or update the property and replace its owners in one transaction
    ///
    /// `owners` must name at least one existing producer. The planted-area
    /// check of [`PropriedadeRepository::save`] applies as well.
    async fn save_with_owners(
        &self,
        propriedade: &PropriedadeRural,
        owners: &[ProdutorId],
    ) -> DomainResult<()>;

    /// Remove the property with its safras, cultivos and links in one transaction
    async fn remove_cascade(&self, id: &PropriedadeId) -> DomainResult<CascadeReport>;
}

/// Repository for crop types
#[async_trait]
pub trait CulturaRepository: Send + Sync {
    async fn save(&self, cultura: &Cultura) -> DomainResult<()>;

    async fn find_by_id(&self, id: &CulturaId) -> DomainResult<Option<Cultura>>;

    /// Case-insensitive lookup by name
    async fn find_by_nome(&self, nome: &str) -> DomainResult<Option<Cultura>>;

    /// Crops ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Cultura>>;

    /// Whether any cultivo references the crop
    async fn is_in_use(&self, id: &CulturaId) -> DomainResult<bool>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: &CulturaId) -> DomainResult<bool>;
}

/// Repository for cultivation seasons
#[async_trait]
pub trait SafraRepository: Send + Sync {
    async fn save(&self, safra: &Safra) -> DomainResult<()>;

    async fn find_by_id(&self, id: &SafraId) -> DomainResult<Option<Safra>>;

    /// Seasons of one property ordered by year
    async fn find_by_propriedade(&self, propriedade: &PropriedadeId) -> DomainResult<Vec<Safra>>;

    async fn find_by_propriedade_and_ano(
        &self,
        propriedade: &PropriedadeId,
        ano: i32,
    ) -> DomainResult<Option<Safra>>;

    /// Seasons ordered by year descending, then id, optionally of one property
    async fn find_all(
        &self,
        propriedade: Option<&PropriedadeId>,
        page: Page,
    ) -> DomainResult<Vec<Safra>>;

    async fn count(&self, propriedade: Option<&PropriedadeId>) -> DomainResult<u64>;

    /// Remove the season and its cultivos in one transaction
    async fn remove_cascade(&self, id: &SafraId) -> DomainResult<CascadeReport>;
}

/// Repository for planting records
#[async_trait]
pub trait CultivoRepository: Send + Sync {
    /// Insert or update a cultivo
    ///
    /// The season's planted sum, this cultivo's previous area excluded, is
    /// read under the same lock or transaction as the write, so concurrent
    /// plantings can never exceed the property's `area_agricultavel`.
    /// Fails with `EntityNotFound` for a missing property, crop or season
    /// and with `BusinessRuleViolation` when the area does not fit.
    async fn save(&self, cultivo: &Cultivo) -> DomainResult<()>;

    async fn find_by_id(&self, id: &CultivoId) -> DomainResult<Option<Cultivo>>;

    /// Matching cultivos ordered by creation time, then id
    async fn find_all(&self, filter: CultivoFilter, page: Page) -> DomainResult<Vec<Cultivo>>;

    async fn count(&self, filter: CultivoFilter) -> DomainResult<u64>;

    /// Sum of planted area in one season, optionally ignoring one cultivo
    async fn planted_area(
        &self,
        safra: &SafraId,
        excluding: Option<&CultivoId>,
    ) -> DomainResult<Hectares>;

    /// Largest per-season planted sum on a property
    async fn max_planted_per_safra(&self, propriedade: &PropriedadeId) -> DomainResult<Hectares>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: &CultivoId) -> DomainResult<bool>;
}

/// Read model for the dashboard
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn snapshot(&self) -> DomainResult<DashboardSnapshot>;
}

/// Append-only audit trail
#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn append(&self, entry: &AuditEntry) -> DomainResult<()>;

    /// Newest first
    async fn find(&self, filter: &AuditFilter) -> DomainResult<Vec<AuditEntry>>;
}

/// Everything the application layer needs from one storage backend
pub trait AgroStore:
    ProdutorRepository
    + PropriedadeRepository
    + CulturaRepository
    + SafraRepository
    + CultivoRepository
    + DashboardRepository
    + AuditRepository
{
}

impl<T> AgroStore for T where
    T: ProdutorRepository
        + PropriedadeRepository
        + CulturaRepository
        + SafraRepository
        + CultivoRepository
        + DashboardRepository
        + AuditRepository
{
}

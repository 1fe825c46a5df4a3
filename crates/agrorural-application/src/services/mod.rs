//! Application services
//!
//! Stateless use-case orchestrators. Each service holds only the repository
//! ports it needs, all backed by the same storage backend.

mod audit_service;
mod cultivo_service;
mod cultura_service;
mod dashboard_service;
mod produtor_service;
mod propriedade_service;
mod safra_service;

pub use audit_service::AuditService;
pub use cultivo_service::CultivoService;
pub use cultura_service::CulturaService;
pub use dashboard_service::DashboardService;
pub use produtor_service::ProdutorService;
pub use propriedade_service::PropriedadeService;
pub use safra_service::SafraService;

use std::collections::BTreeSet;
use std::sync::Arc;

use agrorural_domain::errors::DomainResult;
use agrorural_domain::repositories::AgroStore;

use crate::events::EventPublisher;

/// Every service wired against one storage backend
#[derive(Clone)]
pub struct AgroServices {
    pub produtores: Arc<ProdutorService>,
    pub propriedades: Arc<PropriedadeService>,
    pub culturas: Arc<CulturaService>,
    pub safras: Arc<SafraService>,
    pub cultivos: Arc<CultivoService>,
    pub dashboard: Arc<DashboardService>,
    pub auditoria: Arc<AuditService>,
}

impl AgroServices {
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            produtores: Arc::new(ProdutorService::new(Arc::clone(&store), Arc::clone(&events))),
            propriedades: Arc::new(PropriedadeService::new(
                Arc::clone(&store),
                Arc::clone(&events),
            )),
            culturas: Arc::new(CulturaService::new(Arc::clone(&store), Arc::clone(&events))),
            safras: Arc::new(SafraService::new(Arc::clone(&store), Arc::clone(&events))),
            cultivos: Arc::new(CultivoService::new(Arc::clone(&store), Arc::clone(&events))),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&store))),
            auditoria: Arc::new(AuditService::new(store)),
        }
    }
}

/// Parse a list of ids, dropping duplicates while keeping first-seen order
pub(crate) fn parse_ids<T, F>(raw: &[String], parse: F) -> DomainResult<Vec<T>>
where
    T: Ord + Copy,
    F: Fn(&str) -> DomainResult<T>,
{
    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(raw.len());
    for s in raw {
        let id = parse(s)?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

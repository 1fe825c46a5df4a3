//! API request and response models
//!
//! Query strings are parsed here and handed to the services as
//! application-layer queries.

use serde::Deserialize;
use utoipa::IntoParams;

use agrorural_application::{AuditQuery, CultivoQuery};
use agrorural_domain::repositories::Page;

/// Pagination parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page size, default 50, max 500
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Safra listing parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SafraListParams {
    /// Only seasons of this property
    pub propriedade_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SafraListParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Cultivo listing parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CultivoListParams {
    pub propriedade_id: Option<String>,
    pub safra_id: Option<String>,
    pub cultura_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl CultivoListParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn query(&self) -> CultivoQuery {
        CultivoQuery {
            propriedade_id: self.propriedade_id.clone(),
            safra_id: self.safra_id.clone(),
            cultura_id: self.cultura_id.clone(),
        }
    }
}

/// Audit trail parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditListParams {
    /// produtor, propriedade, cultura, safra or cultivo
    pub entity: Option<String>,
    /// create, update or delete
    pub action: Option<String>,
    pub entity_id: Option<String>,
    /// Default 100, max 500
    pub limit: Option<usize>,
}

impl From<AuditListParams> for AuditQuery {
    fn from(p: AuditListParams) -> Self {
        AuditQuery {
            entity: p.entity,
            action: p.action,
            entity_id: p.entity_id,
            limit: p.limit,
        }
    }
}

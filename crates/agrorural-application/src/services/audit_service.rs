//! Audit trail queries

use std::sync::Arc;

use agrorural_domain::entities::{AuditAction, AuditFilter, EntityKind};
use agrorural_domain::repositories::{AgroStore, AuditRepository, MAX_PAGE_LIMIT};

use crate::dto::{AuditEntryDto, AuditListDto, AuditQuery};
use crate::errors::ApplicationResult;

/// Entries returned when the caller gives no limit
pub const DEFAULT_AUDIT_LIMIT: usize = 100;

pub struct AuditService {
    auditoria: Arc<dyn AuditRepository>,
}

impl AuditService {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            auditoria: store as Arc<dyn AuditRepository>,
        }
    }

    /// Newest entries first
    pub async fn list(&self, query: AuditQuery) -> ApplicationResult<AuditListDto> {
        let filter = AuditFilter {
            entity: query
                .entity
                .as_deref()
                .map(str::parse::<EntityKind>)
                .transpose()?,
            action: query
                .action
                .as_deref()
                .map(str::parse::<AuditAction>)
                .transpose()?,
            entity_id: query.entity_id,
            limit: Some(
                query
                    .limit
                    .unwrap_or(DEFAULT_AUDIT_LIMIT)
                    .clamp(1, MAX_PAGE_LIMIT as usize),
            ),
        };

        let items: Vec<AuditEntryDto> = self
            .auditoria
            .find(&filter)
            .await?
            .iter()
            .map(AuditEntryDto::from_domain)
            .collect();
        let total = items.len() as u64;

        Ok(AuditListDto { items, total })
    }
}

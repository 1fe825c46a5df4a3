//! Event publisher that writes the audit trail
//!
//! Application services publish after their mutation is committed, so a
//! failed append cannot roll anything back. It is logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use agrorural_application::events::{ApplicationEvent, EventPublisher};
use agrorural_domain::entities::AuditEntry;
use agrorural_domain::repositories::AuditRepository;
use agrorural_domain::value_objects::AuditEntryId;

use crate::error::{AuditError, AuditResult};

/// Actor recorded when the caller does not name one
pub const DEFAULT_ACTOR: &str = "api";

/// Persists one `AuditEntry` per application event
pub struct AuditPublisher {
    repository: Arc<dyn AuditRepository>,
    actor: String,
}

impl AuditPublisher {
    pub fn new(repository: Arc<dyn AuditRepository>) -> Self {
        Self {
            repository,
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    /// Record entries under a different actor name
    pub fn with_actor(mut self, actor: impl Into<String>) -> AuditResult<Self> {
        let actor = actor.into();
        if actor.trim().is_empty() {
            return Err(AuditError::ConfigError {
                field: "actor".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        self.actor = actor;
        Ok(self)
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Build the entry for an event without storing it
    pub fn entry_for(&self, event: &ApplicationEvent) -> AuditEntry {
        AuditEntry {
            id: AuditEntryId::new(),
            timestamp: event.timestamp(),
            action: event.action(),
            entity: event.entity(),
            entity_id: event.entity_id().to_string(),
            actor: self.actor.clone(),
            details: event.snapshot().clone(),
        }
    }

    /// Append the entry for `event` and mirror it to the `audit` log target
    pub async fn record(&self, event: &ApplicationEvent) -> AuditResult<AuditEntry> {
        let entry = self.entry_for(event);
        self.repository.append(&entry).await?;

        info!(
            target: "audit",
            audit_id = %entry.id,
            action = entry.action.as_str(),
            entity = entry.entity.as_str(),
            entity_id = %entry.entity_id,
            actor = %entry.actor,
            "{} {}",
            entry.action.as_str(),
            entry.entity.as_str()
        );

        Ok(entry)
    }
}

#[async_trait]
impl EventPublisher for AuditPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        if let Err(e) = self.record(&event).await {
            warn!(
                entity = event.entity().as_str(),
                entity_id = %event.entity_id(),
                action = event.action().as_str(),
                error = %e,
                "failed to persist audit entry"
            );
        }
    }
}

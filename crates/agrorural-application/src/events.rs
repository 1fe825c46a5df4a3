//! Application layer events
//!
//! One event per completed mutation. The audit crate turns them into
//! persisted audit entries; tests collect them in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::{AuditAction, EntityKind};

/// Application-level event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApplicationEvent {
    /// Entity was created; `snapshot` is the resulting DTO
    Created {
        entity: EntityKind,
        entity_id: String,
        snapshot: serde_json::Value,
        timestamp: DateTime<Utc>,
    },

    /// Entity was updated; `snapshot` is the resulting DTO
    Updated {
        entity: EntityKind,
        entity_id: String,
        snapshot: serde_json::Value,
        timestamp: DateTime<Utc>,
    },

    /// Entity was deleted; `snapshot` holds the last state and cascade counts
    Deleted {
        entity: EntityKind,
        entity_id: String,
        snapshot: serde_json::Value,
        timestamp: DateTime<Utc>,
    },
}

impl ApplicationEvent {
    pub fn created(entity: EntityKind, entity_id: impl ToString, snapshot: impl Serialize) -> Self {
        Self::Created {
            entity,
            entity_id: entity_id.to_string(),
            snapshot: to_snapshot(snapshot),
            timestamp: Utc::now(),
        }
    }

    pub fn updated(entity: EntityKind, entity_id: impl ToString, snapshot: impl Serialize) -> Self {
        Self::Updated {
            entity,
            entity_id: entity_id.to_string(),
            snapshot: to_snapshot(snapshot),
            timestamp: Utc::now(),
        }
    }

    pub fn deleted(entity: EntityKind, entity_id: impl ToString, snapshot: impl Serialize) -> Self {
        Self::Deleted {
            entity,
            entity_id: entity_id.to_string(),
            snapshot: to_snapshot(snapshot),
            timestamp: Utc::now(),
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ApplicationEvent::Created { .. } => "Created",
            ApplicationEvent::Updated { .. } => "Updated",
            ApplicationEvent::Deleted { .. } => "Deleted",
        }
    }

    pub fn action(&self) -> AuditAction {
        match self {
            ApplicationEvent::Created { .. } => AuditAction::Create,
            ApplicationEvent::Updated { .. } => AuditAction::Update,
            ApplicationEvent::Deleted { .. } => AuditAction::Delete,
        }
    }

    pub fn entity(&self) -> EntityKind {
        match self {
            ApplicationEvent::Created { entity, .. }
            | ApplicationEvent::Updated { entity, .. }
            | ApplicationEvent::Deleted { entity, .. } => *entity,
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            ApplicationEvent::Created { entity_id, .. }
            | ApplicationEvent::Updated { entity_id, .. }
            | ApplicationEvent::Deleted { entity_id, .. } => entity_id,
        }
    }

    pub fn snapshot(&self) -> &serde_json::Value {
        match self {
            ApplicationEvent::Created { snapshot, .. }
            | ApplicationEvent::Updated { snapshot, .. }
            | ApplicationEvent::Deleted { snapshot, .. } => snapshot,
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ApplicationEvent::Created { timestamp, .. }
            | ApplicationEvent::Updated { timestamp, .. }
            | ApplicationEvent::Deleted { timestamp, .. } => *timestamp,
        }
    }
}

fn to_snapshot(value: impl Serialize) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

/// Event publisher port
///
/// Publication happens after the mutation is committed and cannot fail the
/// use case; implementations log their own failures.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an application event
    async fn publish(&self, event: ApplicationEvent);
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ApplicationEvent) {}
}

/// In-memory event collector for testing
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: tokio::sync::Mutex<Vec<ApplicationEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub async fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().await.clone()
    }

    /// Clear collected events
    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        self.events.lock().await.push(event);
    }
}

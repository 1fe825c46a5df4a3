//! Audit trail DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrorural_domain::entities::AuditEntry;

/// String filters as received from the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    pub entity: Option<String>,
    pub action: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuditEntryDto {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// "create", "update" or "delete"
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub actor: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub details: serde_json::Value,
}

impl AuditEntryDto {
    pub fn from_domain(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            timestamp: entry.timestamp,
            action: entry.action.as_str().to_string(),
            entity: entry.entity.as_str().to_string(),
            entity_id: entry.entity_id.clone(),
            actor: entry.actor.clone(),
            details: entry.details.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuditListDto {
    pub items: Vec<AuditEntryDto>,
    pub total: u64,
}

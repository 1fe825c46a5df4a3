//! Audit trail entries for create/update/delete operations

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::AuditEntryId;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            other => Err(DomainError::validation(
                "action",
                format!("unknown audit action '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kinds that can appear in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Produtor,
    Propriedade,
    Cultura,
    Safra,
    Cultivo,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Produtor => "produtor",
            EntityKind::Propriedade => "propriedade",
            EntityKind::Cultura => "cultura",
            EntityKind::Safra => "safra",
            EntityKind::Cultivo => "cultivo",
        }
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "produtor" => Ok(EntityKind::Produtor),
            "propriedade" => Ok(EntityKind::Propriedade),
            "cultura" => Ok(EntityKind::Cultura),
            "safra" => Ok(EntityKind::Safra),
            "cultivo" => Ok(EntityKind::Cultivo),
            other => Err(DomainError::validation(
                "entity",
                format!("unknown entity kind '{}'", other),
            )),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub entity: EntityKind,
    pub entity_id: String,
    pub actor: String,
    pub details: serde_json::Value,
}

/// Filter for querying the audit trail; `None` matches anything
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity: Option<EntityKind>,
    pub action: Option<AuditAction>,
    pub entity_id: Option<String>,
    pub limit: Option<usize>,
}

impl AuditFilter {
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.entity.map_or(true, |e| e == entry.entity)
            && self.action.map_or(true, |a| a == entry.action)
            && self
                .entity_id
                .as_deref()
                .map_or(true, |id| id == entry.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: AuditAction, entity: EntityKind) -> AuditEntry {
        AuditEntry {
            id: AuditEntryId::new(),
            timestamp: Utc::now(),
            action,
            entity,
            entity_id: "abc".into(),
            actor: "api".into(),
            details: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_filter_matches() {
        let e = entry(AuditAction::Delete, EntityKind::Produtor);
        assert!(AuditFilter::default().matches(&e));
        assert!(AuditFilter {
            entity: Some(EntityKind::Produtor),
            action: Some(AuditAction::Delete),
            ..Default::default()
        }
        .matches(&e));
        assert!(!AuditFilter {
            action: Some(AuditAction::Create),
            ..Default::default()
        }
        .matches(&e));
        assert!(!AuditFilter {
            entity_id: Some("other".into()),
            ..Default::default()
        }
        .matches(&e));
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("Produtor".parse::<EntityKind>().unwrap(), EntityKind::Produtor);
        assert_eq!("UPDATE".parse::<AuditAction>().unwrap(), AuditAction::Update);
        assert!("farm".parse::<EntityKind>().is_err());
    }
}

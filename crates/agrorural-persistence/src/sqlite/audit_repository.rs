//! SQLite Audit Trail

use async_trait::async_trait;

use agrorural_domain::{
    entities::{AuditEntry, AuditFilter},
    errors::DomainResult,
    repositories::AuditRepository,
};

use super::connection::SqliteStore;
use super::records::{into_domain_all, to_domain_error, AuditRecord};
use crate::error::PersistenceError;

#[async_trait]
impl AuditRepository for SqliteStore {
    async fn append(&self, entry: &AuditEntry) -> DomainResult<()> {
        let details = serde_json::to_string(&entry.details)
            .map_err(|e| PersistenceError::corrupt("audit_log", e))?;

        sqlx::query(
            r#"
            INSERT INTO audit_log (id, timestamp, action, entity, entity_id, actor, details)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.timestamp)
        .bind(entry.action.as_str())
        .bind(entry.entity.as_str())
        .bind(&entry.entity_id)
        .bind(&entry.actor)
        .bind(details)
        .execute(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(())
    }

    async fn find(&self, filter: &AuditFilter) -> DomainResult<Vec<AuditEntry>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = filter.limit.map_or(-1, |n| n as i64);
        let rows = sqlx::query_as::<_, AuditRecord>(
            r#"
            SELECT id, timestamp, action, entity, entity_id, actor, details
            FROM audit_log
            WHERE (?1 IS NULL OR entity = ?1)
              AND (?2 IS NULL OR action = ?2)
              AND (?3 IS NULL OR entity_id = ?3)
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?4
            "#,
        )
        .bind(filter.entity.map(|e| e.as_str()))
        .bind(filter.action.map(|a| a.as_str()))
        .bind(filter.entity_id.as_deref())
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, AuditRecord::into_domain)
    }
}

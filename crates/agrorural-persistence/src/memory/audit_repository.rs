//! In-Memory Audit Trail

use async_trait::async_trait;

use agrorural_domain::{
    entities::{AuditEntry, AuditFilter},
    errors::DomainResult,
    repositories::AuditRepository,
};

use super::InMemoryStore;

#[async_trait]
impl AuditRepository for InMemoryStore {
    async fn append(&self, entry: &AuditEntry) -> DomainResult<()> {
        self.tables.write().auditoria.push(entry.clone());
        Ok(())
    }

    async fn find(&self, filter: &AuditFilter) -> DomainResult<Vec<AuditEntry>> {
        let tables = self.tables.read();
        let mut found: Vec<AuditEntry> = tables
            .auditoria
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        // appended in commit order, so a stable sort keeps ties newest first
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = filter.limit {
            found.truncate(limit);
        }
        Ok(found)
    }
}

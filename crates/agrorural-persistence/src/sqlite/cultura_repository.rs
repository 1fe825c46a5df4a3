//! SQLite Cultura Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::{cultura::normalize_nome, Cultura},
    errors::DomainResult,
    repositories::CulturaRepository,
    value_objects::CulturaId,
};

use super::connection::SqliteStore;
use super::records::{into_domain_all, to_domain_error, CulturaRecord};

const SELECT_CULTURA: &str = "SELECT id, nome, created_at, updated_at FROM culturas";

#[async_trait]
impl CulturaRepository for SqliteStore {
    async fn save(&self, cultura: &Cultura) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO culturas (id, nome, nome_key, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                nome = excluded.nome,
                nome_key = excluded.nome_key,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(cultura.id().to_string())
        .bind(cultura.nome())
        .bind(cultura.normalized_nome())
        .bind(cultura.created_at())
        .bind(cultura.updated_at())
        .execute(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CulturaId) -> DomainResult<Option<Cultura>> {
        let record = sqlx::query_as::<_, CulturaRecord>(&format!("{SELECT_CULTURA} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(record.map(CulturaRecord::into_domain).transpose()?)
    }

    async fn find_by_nome(&self, nome: &str) -> DomainResult<Option<Cultura>> {
        let record =
            sqlx::query_as::<_, CulturaRecord>(&format!("{SELECT_CULTURA} WHERE nome_key = ?"))
                .bind(normalize_nome(nome))
                .fetch_optional(self.pool())
                .await
                .map_err(to_domain_error)?;
        Ok(record.map(CulturaRecord::into_domain).transpose()?)
    }

    async fn find_all(&self) -> DomainResult<Vec<Cultura>> {
        let rows = sqlx::query_as::<_, CulturaRecord>(&format!("{SELECT_CULTURA} ORDER BY nome_key, id"))
            .fetch_all(self.pool())
            .await
            .map_err(to_domain_error)?;
        into_domain_all(rows, CulturaRecord::into_domain)
    }

    async fn is_in_use(&self, id: &CulturaId) -> DomainResult<bool> {
        let used: i64 =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cultivos WHERE cultura_id = ?)")
                .bind(id.to_string())
                .fetch_one(self.pool())
                .await
                .map_err(to_domain_error)?;
        Ok(used != 0)
    }

    async fn delete(&self, id: &CulturaId) -> DomainResult<bool> {
        // a referenced crop trips the cultivos foreign key and maps to Conflict
        let result = sqlx::query("DELETE FROM culturas WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(result.rows_affected() > 0)
    }
}

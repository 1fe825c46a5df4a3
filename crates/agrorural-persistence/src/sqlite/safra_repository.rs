//! SQLite Safra Repository Implementation

use async_trait::async_trait;

use agrorural_domain::{
    entities::Safra,
    errors::{DomainError, DomainResult},
    repositories::{CascadeReport, Page, SafraRepository},
    value_objects::{PropriedadeId, SafraId},
};

use super::connection::SqliteStore;
use super::records::{into_domain_all, to_domain_error, SafraRecord};

pub(super) const SELECT_SAFRA: &str =
    "SELECT id, propriedade_id, ano, descricao, created_at, updated_at FROM safras";

#[async_trait]
impl SafraRepository for SqliteStore {
    async fn save(&self, safra: &Safra) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO safras (id, propriedade_id, ano, descricao, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                ano = excluded.ano,
                descricao = excluded.descricao,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(safra.id().to_string())
        .bind(safra.propriedade_id().to_string())
        .bind(safra.ano())
        .bind(safra.descricao())
        .bind(safra.created_at())
        .bind(safra.updated_at())
        .execute(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &SafraId) -> DomainResult<Option<Safra>> {
        let record = sqlx::query_as::<_, SafraRecord>(&format!("{SELECT_SAFRA} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(record.map(SafraRecord::into_domain).transpose()?)
    }

    async fn find_by_propriedade(&self, propriedade: &PropriedadeId) -> DomainResult<Vec<Safra>> {
        let rows = sqlx::query_as::<_, SafraRecord>(&format!(
            "{SELECT_SAFRA} WHERE propriedade_id = ? ORDER BY ano"
        ))
        .bind(propriedade.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, SafraRecord::into_domain)
    }

    async fn find_by_propriedade_and_ano(
        &self,
        propriedade: &PropriedadeId,
        ano: i32,
    ) -> DomainResult<Option<Safra>> {
        let record = sqlx::query_as::<_, SafraRecord>(&format!(
            "{SELECT_SAFRA} WHERE propriedade_id = ? AND ano = ?"
        ))
        .bind(propriedade.to_string())
        .bind(ano)
        .fetch_optional(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(record.map(SafraRecord::into_domain).transpose()?)
    }

    async fn find_all(
        &self,
        propriedade: Option<&PropriedadeId>,
        page: Page,
    ) -> DomainResult<Vec<Safra>> {
        let propriedade = propriedade.map(ToString::to_string);
        let rows = sqlx::query_as::<_, SafraRecord>(&format!(
            "{SELECT_SAFRA} WHERE (?1 IS NULL OR propriedade_id = ?1) \
             ORDER BY ano DESC, id LIMIT ?2 OFFSET ?3"
        ))
        .bind(propriedade)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, SafraRecord::into_domain)
    }

    async fn count(&self, propriedade: Option<&PropriedadeId>) -> DomainResult<u64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM safras WHERE (?1 IS NULL OR propriedade_id = ?1)",
        )
        .bind(propriedade.map(ToString::to_string))
        .fetch_one(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(n as u64)
    }

    async fn remove_cascade(&self, id: &SafraId) -> DomainResult<CascadeReport> {
        let safra_id = id.to_string();
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;

        let cultivos = sqlx::query("DELETE FROM cultivos WHERE safra_id = ?")
            .bind(&safra_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?
            .rows_affected();
        let safras = sqlx::query("DELETE FROM safras WHERE id = ?")
            .bind(&safra_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?
            .rows_affected();
        if safras == 0 {
            return Err(DomainError::not_found("Safra", id));
        }

        tx.commit().await.map_err(to_domain_error)?;
        Ok(CascadeReport {
            safras,
            cultivos,
            ..Default::default()
        })
    }
}

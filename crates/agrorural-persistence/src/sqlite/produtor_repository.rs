//! SQLite Produtor Repository Implementation

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::debug;

use agrorural_domain::{
    entities::Produtor,
    errors::{DomainError, DomainResult},
    repositories::{CascadeReport, Page, ProdutorRepository},
    value_objects::{Documento, ProdutorId, PropriedadeId},
};

use super::connection::SqliteStore;
use super::propriedade_repository::{delete_propriedade, parse_propriedade_ids};
use super::records::{into_domain_all, to_domain_error, ProdutorRecord};

const SELECT_PRODUTOR: &str =
    "SELECT id, documento, nome, created_at, updated_at FROM produtores";

async fn write_produtor(conn: &mut SqliteConnection, produtor: &Produtor) -> DomainResult<()> {
    sqlx::query(
        r#"
        INSERT INTO produtores (id, documento, nome, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            documento = excluded.documento,
            nome = excluded.nome,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(produtor.id().to_string())
    .bind(produtor.documento().as_str())
    .bind(produtor.nome())
    .bind(produtor.created_at())
    .bind(produtor.updated_at())
    .execute(conn)
    .await
    .map_err(to_domain_error)?;
    Ok(())
}

#[async_trait]
impl ProdutorRepository for SqliteStore {
    async fn save(&self, produtor: &Produtor) -> DomainResult<()> {
        debug!("Saving produtor {}", produtor.id());
        let mut conn = self.pool().acquire().await.map_err(to_domain_error)?;
        write_produtor(&mut conn, produtor).await
    }

    async fn find_by_id(&self, id: &ProdutorId) -> DomainResult<Option<Produtor>> {
        let record = sqlx::query_as::<_, ProdutorRecord>(&format!("{SELECT_PRODUTOR} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(record.map(ProdutorRecord::into_domain).transpose()?)
    }

    async fn find_by_documento(&self, documento: &Documento) -> DomainResult<Option<Produtor>> {
        let record =
            sqlx::query_as::<_, ProdutorRecord>(&format!("{SELECT_PRODUTOR} WHERE documento = ?"))
                .bind(documento.as_str())
                .fetch_optional(self.pool())
                .await
                .map_err(to_domain_error)?;
        Ok(record.map(ProdutorRecord::into_domain).transpose()?)
    }

    async fn find_all(&self, page: Page) -> DomainResult<Vec<Produtor>> {
        let rows = sqlx::query_as::<_, ProdutorRecord>(&format!(
            "{SELECT_PRODUTOR} ORDER BY nome, id LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, ProdutorRecord::into_domain)
    }

    async fn count(&self) -> DomainResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produtores")
            .fetch_one(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(n as u64)
    }

    async fn propriedades_of(&self, id: &ProdutorId) -> DomainResult<Vec<PropriedadeId>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT propriedade_id FROM produtor_propriedade WHERE produtor_id = ? ORDER BY propriedade_id",
        )
        .bind(id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        Ok(parse_propriedade_ids(ids)?)
    }

    async fn save_with_propriedades(
        &self,
        produtor: &Produtor,
        propriedades: &[PropriedadeId],
    ) -> DomainResult<()> {
        let produtor_id = produtor.id().to_string();
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;

        for propriedade in propriedades {
            let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM propriedades WHERE id = ?")
                .bind(propriedade.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(to_domain_error)?;
            if found == 0 {
                return Err(DomainError::not_found("PropriedadeRural", propriedade));
            }
        }

        let current: Vec<String> = sqlx::query_scalar(
            "SELECT propriedade_id FROM produtor_propriedade WHERE produtor_id = ?",
        )
        .bind(&produtor_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(to_domain_error)?;
        for dropped in parse_propriedade_ids(current)?
            .iter()
            .filter(|p| !propriedades.contains(p))
        {
            let others: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM produtor_propriedade \
                 WHERE propriedade_id = ? AND produtor_id <> ?",
            )
            .bind(dropped.to_string())
            .bind(&produtor_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(to_domain_error)?;
            if others == 0 {
                return Err(DomainError::rule(format!(
                    "propriedade {} would be left without owners",
                    dropped
                )));
            }
        }

        write_produtor(&mut tx, produtor).await?;

        sqlx::query("DELETE FROM produtor_propriedade WHERE produtor_id = ?")
            .bind(&produtor_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?;
        for propriedade in propriedades {
            sqlx::query(
                "INSERT INTO produtor_propriedade (produtor_id, propriedade_id) VALUES (?, ?)",
            )
            .bind(&produtor_id)
            .bind(propriedade.to_string())
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?;
        }

        tx.commit().await.map_err(to_domain_error)?;
        Ok(())
    }

    async fn remove_cascade(&self, id: &ProdutorId) -> DomainResult<CascadeReport> {
        let produtor_id = id.to_string();
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;

        let linked: Vec<String> = sqlx::query_scalar(
            "SELECT propriedade_id FROM produtor_propriedade WHERE produtor_id = ?",
        )
        .bind(&produtor_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(to_domain_error)?;

        let mut report = CascadeReport::default();
        report.vinculos = sqlx::query("DELETE FROM produtor_propriedade WHERE produtor_id = ?")
            .bind(&produtor_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?
            .rows_affected();

        for propriedade in &linked {
            let owners: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM produtor_propriedade WHERE propriedade_id = ?",
            )
            .bind(propriedade)
            .fetch_one(&mut *tx)
            .await
            .map_err(to_domain_error)?;
            if owners == 0 {
                report += delete_propriedade(&mut tx, propriedade)
                    .await
                    .map_err(to_domain_error)?;
            }
        }

        report.produtores = sqlx::query("DELETE FROM produtores WHERE id = ?")
            .bind(&produtor_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?
            .rows_affected();
        if report.produtores == 0 {
            // dropping the transaction rolls back the link deletes
            return Err(DomainError::not_found("Produtor", id));
        }

        tx.commit().await.map_err(to_domain_error)?;
        debug!(
            "Removed produtor {} with {} propriedades",
            id, report.propriedades
        );
        Ok(report)
    }
}

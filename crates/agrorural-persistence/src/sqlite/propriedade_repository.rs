//! SQLite Propriedade Repository Implementation

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::debug;

use agrorural_domain::{
    entities::PropriedadeRural,
    errors::{DomainError, DomainResult},
    repositories::{CascadeReport, Page, PropriedadeRepository},
    rules,
    value_objects::{ProdutorId, PropriedadeId},
};

use super::connection::SqliteStore;
use super::cultivo_repository::max_planted;
use super::records::{into_domain_all, to_domain_error, PropriedadeRecord};
use crate::error::PersistenceError;

pub(super) const SELECT_PROPRIEDADE: &str = "SELECT id, nome, cidade, estado, area_total, area_agricultavel, \
     area_vegetacao, created_at, updated_at FROM propriedades";

/// Delete a property with its cultivos, safras and links on an open transaction
pub(super) async fn delete_propriedade(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<CascadeReport, sqlx::Error> {
    let cultivos = sqlx::query("DELETE FROM cultivos WHERE propriedade_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    let safras = sqlx::query("DELETE FROM safras WHERE propriedade_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    let vinculos = sqlx::query("DELETE FROM produtor_propriedade WHERE propriedade_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    let propriedades = sqlx::query("DELETE FROM propriedades WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(CascadeReport {
        produtores: 0,
        propriedades,
        vinculos,
        safras,
        cultivos,
    })
}

/// Upsert the row once its areas are known to hold every planted season
async fn write_propriedade(
    conn: &mut SqliteConnection,
    propriedade: &PropriedadeRural,
) -> DomainResult<()> {
    let largest = max_planted(&mut *conn, &propriedade.id()).await?;
    rules::check_areas_cover_plantings(&propriedade.areas(), largest)?;

    sqlx::query(
        r#"
        INSERT INTO propriedades
            (id, nome, cidade, estado, area_total, area_agricultavel, area_vegetacao,
             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            nome = excluded.nome,
            cidade = excluded.cidade,
            estado = excluded.estado,
            area_total = excluded.area_total,
            area_agricultavel = excluded.area_agricultavel,
            area_vegetacao = excluded.area_vegetacao,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(propriedade.id().to_string())
    .bind(propriedade.nome())
    .bind(propriedade.cidade())
    .bind(propriedade.estado().code())
    .bind(propriedade.area_total().value())
    .bind(propriedade.area_agricultavel().value())
    .bind(propriedade.area_vegetacao().value())
    .bind(propriedade.created_at())
    .bind(propriedade.updated_at())
    .execute(&mut *conn)
    .await
    .map_err(to_domain_error)?;
    Ok(())
}

pub(super) fn parse_propriedade_ids(
    raw: Vec<String>,
) -> Result<Vec<PropriedadeId>, PersistenceError> {
    raw.iter()
        .map(|s| {
            PropriedadeId::from_string(s)
                .map_err(|e| PersistenceError::corrupt("produtor_propriedade", e))
        })
        .collect()
}

#[async_trait]
impl PropriedadeRepository for SqliteStore {
    async fn save(&self, propriedade: &PropriedadeRural) -> DomainResult<()> {
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;
        write_propriedade(&mut tx, propriedade).await?;
        tx.commit().await.map_err(to_domain_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &PropriedadeId) -> DomainResult<Option<PropriedadeRural>> {
        let record =
            sqlx::query_as::<_, PropriedadeRecord>(&format!("{SELECT_PROPRIEDADE} WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(self.pool())
                .await
                .map_err(to_domain_error)?;
        Ok(record.map(PropriedadeRecord::into_domain).transpose()?)
    }

    async fn find_all(&self, page: Page) -> DomainResult<Vec<PropriedadeRural>> {
        let rows = sqlx::query_as::<_, PropriedadeRecord>(&format!(
            "{SELECT_PROPRIEDADE} ORDER BY nome, id LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, PropriedadeRecord::into_domain)
    }

    async fn count(&self) -> DomainResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM propriedades")
            .fetch_one(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(n as u64)
    }

    async fn owners_of(&self, id: &PropriedadeId) -> DomainResult<Vec<ProdutorId>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT produtor_id FROM produtor_propriedade WHERE propriedade_id = ? ORDER BY produtor_id",
        )
        .bind(id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;

        let owners = ids
            .iter()
            .map(|s| {
                ProdutorId::from_string(s)
                    .map_err(|e| PersistenceError::corrupt("produtor_propriedade", e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(owners)
    }

    async fn save_with_owners(
        &self,
        propriedade: &PropriedadeRural,
        owners: &[ProdutorId],
    ) -> DomainResult<()> {
        if owners.is_empty() {
            return Err(DomainError::validation(
                "produtor_ids",
                "a propriedade needs at least one produtor",
            ));
        }

        let propriedade_id = propriedade.id().to_string();
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;

        for owner in owners {
            let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produtores WHERE id = ?")
                .bind(owner.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(to_domain_error)?;
            if found == 0 {
                return Err(DomainError::not_found("Produtor", owner));
            }
        }

        write_propriedade(&mut tx, propriedade).await?;

        sqlx::query("DELETE FROM produtor_propriedade WHERE propriedade_id = ?")
            .bind(&propriedade_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?;
        for owner in owners {
            sqlx::query(
                "INSERT INTO produtor_propriedade (produtor_id, propriedade_id) VALUES (?, ?)",
            )
            .bind(owner.to_string())
            .bind(&propriedade_id)
            .execute(&mut *tx)
            .await
            .map_err(to_domain_error)?;
        }

        tx.commit().await.map_err(to_domain_error)?;
        debug!("Saved propriedade {} with {} owners", propriedade_id, owners.len());
        Ok(())
    }

    async fn remove_cascade(&self, id: &PropriedadeId) -> DomainResult<CascadeReport> {
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;
        let report = delete_propriedade(&mut tx, &id.to_string())
            .await
            .map_err(to_domain_error)?;
        if report.propriedades == 0 {
            return Err(DomainError::not_found("PropriedadeRural", id));
        }
        tx.commit().await.map_err(to_domain_error)?;
        Ok(report)
    }
}

//! SQLite Cultivo Repository Implementation

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::debug;

use agrorural_domain::{
    entities::Cultivo,
    errors::{DomainError, DomainResult},
    repositories::{CultivoFilter, CultivoRepository, Page},
    rules,
    value_objects::{CultivoId, Hectares, PropriedadeId, SafraId},
};

use super::connection::SqliteStore;
use super::propriedade_repository::SELECT_PROPRIEDADE;
use super::records::{
    into_domain_all, to_domain_error, CultivoRecord, PropriedadeRecord, SafraRecord,
};
use super::safra_repository::SELECT_SAFRA;

const SELECT_CULTIVO: &str = "SELECT id, propriedade_id, cultura_id, safra_id, area_plantada, \
     created_at, updated_at FROM cultivos";

/// Optional filters bound as ?1..?3; NULL matches anything
const FILTER_CLAUSE: &str = "WHERE (?1 IS NULL OR propriedade_id = ?1) \
     AND (?2 IS NULL OR safra_id = ?2) \
     AND (?3 IS NULL OR cultura_id = ?3)";

struct FilterBinds {
    propriedade_id: Option<String>,
    safra_id: Option<String>,
    cultura_id: Option<String>,
}

impl From<CultivoFilter> for FilterBinds {
    fn from(f: CultivoFilter) -> Self {
        Self {
            propriedade_id: f.propriedade_id.map(|id| id.to_string()),
            safra_id: f.safra_id.map(|id| id.to_string()),
            cultura_id: f.cultura_id.map(|id| id.to_string()),
        }
    }
}

/// Planted sum of one season, optionally ignoring one cultivo
async fn planted_sum(
    conn: &mut SqliteConnection,
    safra: &SafraId,
    excluding: Option<&CultivoId>,
) -> DomainResult<Hectares> {
    let total: f64 = sqlx::query_scalar(
        "SELECT TOTAL(area_plantada) FROM cultivos WHERE safra_id = ?1 AND (?2 IS NULL OR id <> ?2)",
    )
    .bind(safra.to_string())
    .bind(excluding.map(ToString::to_string))
    .fetch_one(conn)
    .await
    .map_err(to_domain_error)?;
    Hectares::new("area_plantada", total)
}

/// Largest per-season planted sum of a property
pub(super) async fn max_planted(
    conn: &mut SqliteConnection,
    propriedade: &PropriedadeId,
) -> DomainResult<Hectares> {
    let max: f64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(MAX(planted), 0.0) FROM (
            SELECT TOTAL(area_plantada) AS planted
            FROM cultivos
            WHERE propriedade_id = ?
            GROUP BY safra_id
        )
        "#,
    )
    .bind(propriedade.to_string())
    .fetch_one(conn)
    .await
    .map_err(to_domain_error)?;
    Hectares::new("area_plantada", max)
}

#[async_trait]
impl CultivoRepository for SqliteStore {
    async fn save(&self, cultivo: &Cultivo) -> DomainResult<()> {
        let mut tx = self.begin_write().await.map_err(to_domain_error)?;

        let propriedade =
            sqlx::query_as::<_, PropriedadeRecord>(&format!("{SELECT_PROPRIEDADE} WHERE id = ?"))
                .bind(cultivo.propriedade_id().to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(to_domain_error)?
                .ok_or_else(|| {
                    DomainError::not_found("PropriedadeRural", cultivo.propriedade_id())
                })?
                .into_domain()?;

        let cultura: Option<String> = sqlx::query_scalar("SELECT id FROM culturas WHERE id = ?")
            .bind(cultivo.cultura_id().to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(to_domain_error)?;
        if cultura.is_none() {
            return Err(DomainError::not_found("Cultura", cultivo.cultura_id()));
        }

        let safra = sqlx::query_as::<_, SafraRecord>(&format!("{SELECT_SAFRA} WHERE id = ?"))
            .bind(cultivo.safra_id().to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(to_domain_error)?
            .ok_or_else(|| DomainError::not_found("Safra", cultivo.safra_id()))?
            .into_domain()?;

        let planted = planted_sum(&mut tx, &safra.id(), Some(&cultivo.id())).await?;
        debug!(
            safra_id = %safra.id(),
            planted = planted.value(),
            requested = cultivo.area_plantada().value(),
            "checking planted area"
        );
        rules::check_planting(&propriedade, &safra, planted, cultivo.area_plantada())?;

        sqlx::query(
            r#"
            INSERT INTO cultivos
                (id, propriedade_id, cultura_id, safra_id, area_plantada, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                cultura_id = excluded.cultura_id,
                area_plantada = excluded.area_plantada,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(cultivo.id().to_string())
        .bind(cultivo.propriedade_id().to_string())
        .bind(cultivo.cultura_id().to_string())
        .bind(cultivo.safra_id().to_string())
        .bind(cultivo.area_plantada().value())
        .bind(cultivo.created_at())
        .bind(cultivo.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(to_domain_error)?;

        tx.commit().await.map_err(to_domain_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CultivoId) -> DomainResult<Option<Cultivo>> {
        let record = sqlx::query_as::<_, CultivoRecord>(&format!("{SELECT_CULTIVO} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(record.map(CultivoRecord::into_domain).transpose()?)
    }

    async fn find_all(&self, filter: CultivoFilter, page: Page) -> DomainResult<Vec<Cultivo>> {
        let binds = FilterBinds::from(filter);
        let rows = sqlx::query_as::<_, CultivoRecord>(&format!(
            "{SELECT_CULTIVO} {FILTER_CLAUSE} ORDER BY created_at, id LIMIT ?4 OFFSET ?5"
        ))
        .bind(binds.propriedade_id)
        .bind(binds.safra_id)
        .bind(binds.cultura_id)
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;
        into_domain_all(rows, CultivoRecord::into_domain)
    }

    async fn count(&self, filter: CultivoFilter) -> DomainResult<u64> {
        let binds = FilterBinds::from(filter);
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM cultivos {FILTER_CLAUSE}"))
            .bind(binds.propriedade_id)
            .bind(binds.safra_id)
            .bind(binds.cultura_id)
            .fetch_one(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(n as u64)
    }

    async fn planted_area(
        &self,
        safra: &SafraId,
        excluding: Option<&CultivoId>,
    ) -> DomainResult<Hectares> {
        let mut conn = self.pool().acquire().await.map_err(to_domain_error)?;
        planted_sum(&mut conn, safra, excluding).await
    }

    async fn max_planted_per_safra(&self, propriedade: &PropriedadeId) -> DomainResult<Hectares> {
        let mut conn = self.pool().acquire().await.map_err(to_domain_error)?;
        max_planted(&mut conn, propriedade).await
    }

    async fn delete(&self, id: &CultivoId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM cultivos WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(to_domain_error)?;
        Ok(result.rows_affected() > 0)
    }
}

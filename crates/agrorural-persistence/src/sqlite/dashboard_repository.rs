//! SQLite Dashboard Read Model
//!
//! Sums and counts are computed by SQLite; percentages are left to the
//! domain.

use async_trait::async_trait;

use agrorural_domain::{
    dashboard::DashboardSnapshot,
    errors::{DomainError, DomainResult},
    repositories::DashboardRepository,
    value_objects::Uf,
};

use super::connection::SqliteStore;
use super::records::to_domain_error;
use crate::error::PersistenceError;

#[async_trait]
impl DashboardRepository for SqliteStore {
    async fn snapshot(&self) -> DomainResult<DashboardSnapshot> {
        let (fazendas, hectares, agricultavel, vegetacao): (i64, f64, f64, f64) = sqlx::query_as(
            "SELECT COUNT(*), TOTAL(area_total), TOTAL(area_agricultavel), TOTAL(area_vegetacao) \
             FROM propriedades",
        )
        .fetch_one(self.pool())
        .await
        .map_err(to_domain_error)?;

        let estados: Vec<(String, i64)> = sqlx::query_as(
            "SELECT estado, COUNT(*) FROM propriedades GROUP BY estado ORDER BY estado",
        )
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;

        let culturas: Vec<(String, f64, i64)> = sqlx::query_as(
            r#"
            SELECT c.nome, TOTAL(v.area_plantada), COUNT(*)
            FROM cultivos v
            JOIN culturas c ON c.id = v.cultura_id
            GROUP BY c.id, c.nome
            ORDER BY c.nome
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(to_domain_error)?;

        let fazendas_por_estado = estados
            .into_iter()
            .map(|(estado, n)| -> Result<(Uf, u64), DomainError> {
                let uf = estado
                    .parse::<Uf>()
                    .map_err(|e| PersistenceError::corrupt("propriedades", e))?;
                Ok((uf, n as u64))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(DashboardSnapshot {
            total_fazendas: fazendas as u64,
            total_hectares: hectares,
            fazendas_por_estado,
            area_por_cultura: culturas
                .into_iter()
                .map(|(nome, area, n)| (nome, area, n as u64))
                .collect(),
            area_agricultavel: agricultavel,
            area_vegetacao: vegetacao,
        })
    }
}

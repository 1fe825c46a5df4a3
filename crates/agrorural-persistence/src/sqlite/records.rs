//! Row types and their mapping back to domain entities
//!
//! Rows are trusted only as far as the schema goes; anything that fails to
//! parse is reported as a corrupt row rather than a validation error.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use agrorural_domain::{
    entities::{AuditEntry, Areas, Cultivo, Cultura, Produtor, PropriedadeRural, Safra},
    errors::DomainError,
    value_objects::{
        AuditEntryId, CultivoId, CulturaId, Documento, Hectares, ProdutorId, PropriedadeId,
        SafraId, Uf,
    },
};

use crate::error::PersistenceError;

pub(super) type RowResult<T> = Result<T, PersistenceError>;

fn field<T>(table: &'static str, parsed: Result<T, DomainError>) -> RowResult<T> {
    parsed.map_err(|e| PersistenceError::corrupt(table, e))
}

/// Helper to convert SQLite errors to DomainError
pub(super) fn to_domain_error(e: sqlx::Error) -> DomainError {
    PersistenceError::from(e).into()
}

#[derive(Debug, FromRow)]
pub(super) struct ProdutorRecord {
    pub id: String,
    pub documento: String,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProdutorRecord {
    pub fn into_domain(self) -> RowResult<Produtor> {
        const T: &str = "produtores";
        Ok(Produtor::reconstitute(
            field(T, ProdutorId::from_string(&self.id))?,
            field(T, Documento::parse(&self.documento))?,
            self.nome,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PropriedadeRecord {
    pub id: String,
    pub nome: String,
    pub cidade: String,
    pub estado: String,
    pub area_total: f64,
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropriedadeRecord {
    pub fn into_domain(self) -> RowResult<PropriedadeRural> {
        const T: &str = "propriedades";
        Ok(PropriedadeRural::reconstitute(
            field(T, PropriedadeId::from_string(&self.id))?,
            self.nome,
            self.cidade,
            field(T, self.estado.parse::<Uf>())?,
            field(
                T,
                Areas::new(self.area_total, self.area_agricultavel, self.area_vegetacao),
            )?,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CulturaRecord {
    pub id: String,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CulturaRecord {
    pub fn into_domain(self) -> RowResult<Cultura> {
        Ok(Cultura::reconstitute(
            field("culturas", CulturaId::from_string(&self.id))?,
            self.nome,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SafraRecord {
    pub id: String,
    pub propriedade_id: String,
    pub ano: i32,
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SafraRecord {
    pub fn into_domain(self) -> RowResult<Safra> {
        const T: &str = "safras";
        Ok(Safra::reconstitute(
            field(T, SafraId::from_string(&self.id))?,
            field(T, PropriedadeId::from_string(&self.propriedade_id))?,
            self.ano,
            self.descricao,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CultivoRecord {
    pub id: String,
    pub propriedade_id: String,
    pub cultura_id: String,
    pub safra_id: String,
    pub area_plantada: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CultivoRecord {
    pub fn into_domain(self) -> RowResult<Cultivo> {
        const T: &str = "cultivos";
        Ok(Cultivo::reconstitute(
            field(T, CultivoId::from_string(&self.id))?,
            field(T, PropriedadeId::from_string(&self.propriedade_id))?,
            field(T, CulturaId::from_string(&self.cultura_id))?,
            field(T, SafraId::from_string(&self.safra_id))?,
            field(T, Hectares::positive("area_plantada", self.area_plantada))?,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct AuditRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub actor: String,
    pub details: String,
}

impl AuditRecord {
    pub fn into_domain(self) -> RowResult<AuditEntry> {
        const T: &str = "audit_log";
        Ok(AuditEntry {
            id: field(T, AuditEntryId::from_string(&self.id))?,
            timestamp: self.timestamp,
            action: field(T, self.action.parse())?,
            entity: field(T, self.entity.parse())?,
            entity_id: self.entity_id,
            actor: self.actor,
            details: serde_json::from_str(&self.details)
                .map_err(|e| PersistenceError::corrupt(T, e))?,
        })
    }
}

/// Map every row, stopping at the first corrupt one
pub(super) fn into_domain_all<R, T>(
    rows: Vec<R>,
    map: impl Fn(R) -> RowResult<T>,
) -> Result<Vec<T>, DomainError> {
    rows.into_iter()
        .map(|r| map(r).map_err(DomainError::from))
        .collect()
}

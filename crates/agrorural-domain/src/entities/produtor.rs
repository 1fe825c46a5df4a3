//! Produtor aggregate
//!
//! A rural producer, individual (CPF) or legal entity (CNPJ).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;
use crate::errors::DomainResult;
use crate::value_objects::{Documento, ProdutorId};

/// Maximum length of a producer name
pub const NOME_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produtor {
    id: ProdutorId,
    documento: Documento,
    nome: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Produtor {
    /// Create a new producer
    ///
    /// # Errors
    /// Returns DomainError if the document or name are invalid
    pub fn create(documento: &str, nome: &str) -> DomainResult<Self> {
        let documento = Documento::parse(documento)?;
        let nome = validate_text("nome", nome, NOME_MAX)?;
        let now = Utc::now();

        Ok(Self {
            id: ProdutorId::new(),
            documento,
            nome,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild from persisted state without re-running validation
    pub fn reconstitute(
        id: ProdutorId,
        documento: Documento,
        nome: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            documento,
            nome,
            created_at,
            updated_at,
        }
    }

    pub fn rename(&mut self, nome: &str) -> DomainResult<()> {
        self.nome = validate_text("nome", nome, NOME_MAX)?;
        self.touch();
        Ok(())
    }

    pub fn change_documento(&mut self, documento: &str) -> DomainResult<()> {
        self.documento = Documento::parse(documento)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> ProdutorId {
        self.id
    }

    pub fn documento(&self) -> &Documento {
        &self.documento
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

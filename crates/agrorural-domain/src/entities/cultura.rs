//! Cultura: a crop type such as soybean or corn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;
use crate::errors::DomainResult;
use crate::value_objects::CulturaId;

const NOME_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cultura {
    id: CulturaId,
    nome: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cultura {
    pub fn create(nome: &str) -> DomainResult<Self> {
        let nome = validate_text("nome", nome, NOME_MAX)?;
        let now = Utc::now();
        Ok(Self {
            id: CulturaId::new(),
            nome,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstitute(
        id: CulturaId,
        nome: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            nome,
            created_at,
            updated_at,
        }
    }

    pub fn rename(&mut self, nome: &str) -> DomainResult<()> {
        self.nome = validate_text("nome", nome, NOME_MAX)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Lowercased name used for uniqueness checks
    pub fn normalized_nome(&self) -> String {
        normalize_nome(&self.nome)
    }

    pub fn id(&self) -> CulturaId {
        self.id
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

/// Case-insensitive key for crop names
pub fn normalize_nome(nome: &str) -> String {
    nome.trim().to_lowercase()
}

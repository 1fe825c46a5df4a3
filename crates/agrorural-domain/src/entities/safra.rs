//! Safra: a cultivation season of one property

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{PropriedadeId, SafraId};

/// Accepted season years
pub const ANO_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

const DESCRICAO_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Safra {
    id: SafraId,
    propriedade_id: PropriedadeId,
    ano: i32,
    descricao: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Safra {
    pub fn create(
        propriedade_id: PropriedadeId,
        ano: i32,
        descricao: Option<&str>,
    ) -> DomainResult<Self> {
        validate_ano(ano)?;
        let descricao = normalize_descricao(descricao)?;
        let now = Utc::now();
        Ok(Self {
            id: SafraId::new(),
            propriedade_id,
            ano,
            descricao,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstitute(
        id: SafraId,
        propriedade_id: PropriedadeId,
        ano: i32,
        descricao: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            propriedade_id,
            ano,
            descricao,
            created_at,
            updated_at,
        }
    }

    pub fn set_ano(&mut self, ano: i32) -> DomainResult<()> {
        validate_ano(ano)?;
        self.ano = ano;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// `None` clears the description
    pub fn set_descricao(&mut self, descricao: Option<&str>) -> DomainResult<()> {
        self.descricao = normalize_descricao(descricao)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> SafraId {
        self.id
    }

    pub fn propriedade_id(&self) -> PropriedadeId {
        self.propriedade_id
    }

    pub fn ano(&self) -> i32 {
        self.ano
    }

    pub fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_ano(ano: i32) -> DomainResult<()> {
    if !ANO_RANGE.contains(&ano) {
        return Err(DomainError::validation(
            "ano",
            format!(
                "must be between {} and {}",
                ANO_RANGE.start(),
                ANO_RANGE.end()
            ),
        ));
    }
    Ok(())
}

fn normalize_descricao(descricao: Option<&str>) -> DomainResult<Option<String>> {
    match descricao.map(str::trim) {
        None | Some("") => Ok(None),
        Some(d) if d.chars().count() > DESCRICAO_MAX => Err(DomainError::validation(
            "descricao",
            format!("must be at most {} characters", DESCRICAO_MAX),
        )),
        Some(d) => Ok(Some(d.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_safra() {
        let s = Safra::create(PropriedadeId::new(), 2024, Some(" Safra verão ")).unwrap();
        assert_eq!(s.ano(), 2024);
        assert_eq!(s.descricao(), Some("Safra verão"));
    }

    #[test]
    fn test_blank_description_is_none() {
        let s = Safra::create(PropriedadeId::new(), 2024, Some("   ")).unwrap();
        assert_eq!(s.descricao(), None);
    }

    #[test]
    fn test_year_bounds() {
        assert!(Safra::create(PropriedadeId::new(), 1899, None).is_err());
        assert!(Safra::create(PropriedadeId::new(), 2101, None).is_err());
        assert!(Safra::create(PropriedadeId::new(), 1900, None).is_ok());
    }
}

//! Value objects representing immutable domain concepts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse from the hyphenated string representation
            pub fn from_string(s: &str) -> DomainResult<Self> {
                uuid::Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::InvalidId {
                        entity_type: $entity.to_string(),
                        value: s.to_string(),
                    })
            }

            /// Wrap an existing UUID
            pub fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

entity_id!(
    /// Producer identifier
    ProdutorId,
    "Produtor"
);
entity_id!(
    /// Rural property identifier
    PropriedadeId,
    "PropriedadeRural"
);
entity_id!(
    /// Crop type identifier
    CulturaId,
    "Cultura"
);
entity_id!(
    /// Cultivation season identifier
    SafraId,
    "Safra"
);
entity_id!(
    /// Planting record identifier
    CultivoId,
    "Cultivo"
);
entity_id!(
    /// Audit entry identifier
    AuditEntryId,
    "AuditEntry"
);

/// Kind of national tax document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentoKind {
    /// Individual taxpayer registry (11 digits)
    Cpf,
    /// Legal entity registry (14 digits)
    Cnpj,
}

/// National tax ID of a producer, stored as digits only
///
/// Accepts punctuated input (`529.982.247-25`, `11.222.333/0001-81`) and
/// validates the mod-11 check digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Documento {
    digits: String,
}

impl Documento {
    /// Parse and validate a CPF or CNPJ
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let mut digits = String::with_capacity(14);
        for c in raw.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | '-' | '/' | ' ' => {}
                other => {
                    return Err(DomainError::InvalidDocumento {
                        reason: format!("unexpected character '{}'", other),
                    })
                }
            }
        }

        let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
        if values.windows(2).all(|w| w[0] == w[1]) && !values.is_empty() {
            return Err(DomainError::InvalidDocumento {
                reason: "repeated digit sequence".into(),
            });
        }

        let valid = match values.len() {
            11 => cpf_check_digits(&values[..9]) == (values[9], values[10]),
            14 => cnpj_check_digits(&values[..12]) == (values[12], values[13]),
            n => {
                return Err(DomainError::InvalidDocumento {
                    reason: format!("expected 11 (CPF) or 14 (CNPJ) digits, got {}", n),
                })
            }
        };

        if !valid {
            return Err(DomainError::InvalidDocumento {
                reason: "check digits do not match".into(),
            });
        }

        Ok(Self { digits })
    }

    pub fn kind(&self) -> DocumentoKind {
        if self.digits.len() == 11 {
            DocumentoKind::Cpf
        } else {
            DocumentoKind::Cnpj
        }
    }

    /// Digits only, as stored
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Conventional punctuated rendering
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        match self.kind() {
            DocumentoKind::Cpf => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
            DocumentoKind::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &d[0..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..14]
            ),
        }
    }
}

fn cpf_check_digits(base: &[u32]) -> (u32, u32) {
    let dv = |digits: &[u32]| {
        let weight_start = digits.len() as u32 + 1;
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();
        let r = (sum * 10) % 11;
        if r == 10 {
            0
        } else {
            r
        }
    };
    let first = dv(base);
    let mut extended = base.to_vec();
    extended.push(first);
    (first, dv(&extended))
}

fn cnpj_check_digits(base: &[u32]) -> (u32, u32) {
    const W1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const W2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    let dv = |digits: &[u32], weights: &[u32]| {
        let r = digits.iter().zip(weights).map(|(d, w)| d * w).sum::<u32>() % 11;
        if r < 2 {
            0
        } else {
            11 - r
        }
    };
    let first = dv(base, &W1);
    let mut extended = base.to_vec();
    extended.push(first);
    (first, dv(&extended, &W2))
}

impl fmt::Display for Documento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl TryFrom<String> for Documento {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Documento> for String {
    fn from(value: Documento) -> Self {
        value.digits
    }
}

/// Brazilian federative unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Uf {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl Uf {
    pub const ALL: [Uf; 27] = [
        Uf::AC,
        Uf::AL,
        Uf::AP,
        Uf::AM,
        Uf::BA,
        Uf::CE,
        Uf::DF,
        Uf::ES,
        Uf::GO,
        Uf::MA,
        Uf::MT,
        Uf::MS,
        Uf::MG,
        Uf::PA,
        Uf::PB,
        Uf::PR,
        Uf::PE,
        Uf::PI,
        Uf::RJ,
        Uf::RN,
        Uf::RS,
        Uf::RO,
        Uf::RR,
        Uf::SC,
        Uf::SP,
        Uf::SE,
        Uf::TO,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Uf::AC => "AC",
            Uf::AL => "AL",
            Uf::AP => "AP",
            Uf::AM => "AM",
            Uf::BA => "BA",
            Uf::CE => "CE",
            Uf::DF => "DF",
            Uf::ES => "ES",
            Uf::GO => "GO",
            Uf::MA => "MA",
            Uf::MT => "MT",
            Uf::MS => "MS",
            Uf::MG => "MG",
            Uf::PA => "PA",
            Uf::PB => "PB",
            Uf::PR => "PR",
            Uf::PE => "PE",
            Uf::PI => "PI",
            Uf::RJ => "RJ",
            Uf::RN => "RN",
            Uf::RS => "RS",
            Uf::RO => "RO",
            Uf::RR => "RR",
            Uf::SC => "SC",
            Uf::SP => "SP",
            Uf::SE => "SE",
            Uf::TO => "TO",
        }
    }
}

impl FromStr for Uf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Uf::ALL
            .iter()
            .copied()
            .find(|uf| uf.code() == wanted)
            .ok_or_else(|| DomainError::InvalidUf {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Uf {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Uf> for String {
    fn from(value: Uf) -> Self {
        value.code().to_string()
    }
}

/// Area in hectares; finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hectares(f64);

/// Absolute tolerance used when comparing area sums
pub const AREA_EPSILON: f64 = 1e-9;

impl Hectares {
    pub const ZERO: Hectares = Hectares(0.0);

    /// Validate a raw value for the named field
    pub fn new(field: &str, value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::InvalidArea {
                field: field.to_string(),
                reason: "must be a finite number".into(),
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidArea {
                field: field.to_string(),
                reason: "must not be negative".into(),
            });
        }
        Ok(Self(value))
    }

    /// Validate a value that must be strictly positive
    pub fn positive(field: &str, value: f64) -> DomainResult<Self> {
        let area = Self::new(field, value)?;
        if area.0 <= 0.0 {
            return Err(DomainError::InvalidArea {
                field: field.to_string(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(area)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `self <= other` within [`AREA_EPSILON`]
    pub fn fits_within(&self, other: Hectares) -> bool {
        self.0 <= other.0 + AREA_EPSILON
    }
}

impl std::ops::Add for Hectares {
    type Output = Hectares;

    fn add(self, rhs: Self) -> Self::Output {
        Hectares(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Hectares {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hectares::ZERO, |acc, h| acc + h)
    }
}

impl fmt::Display for Hectares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ha", self.0)
    }
}

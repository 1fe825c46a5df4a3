//! Dashboard DTOs

use serde::{Deserialize, Serialize};

use agrorural_domain::dashboard::Dashboard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EstadoStatDto {
    pub estado: String,
    pub quantidade: u64,
    pub percentual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CulturaStatDto {
    pub cultura: String,
    pub area_plantada: f64,
    pub quantidade: u64,
    pub percentual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsoDoSoloDto {
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
    pub percentual_agricultavel: f64,
    pub percentual_vegetacao: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardDto {
    pub total_fazendas: u64,
    pub total_hectares: f64,
    pub por_estado: Vec<EstadoStatDto>,
    pub por_cultura: Vec<CulturaStatDto>,
    pub uso_do_solo: UsoDoSoloDto,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            total_fazendas: d.total_fazendas,
            total_hectares: d.total_hectares,
            por_estado: d
                .por_estado
                .into_iter()
                .map(|s| EstadoStatDto {
                    estado: s.estado.code().to_string(),
                    quantidade: s.quantidade,
                    percentual: s.percentual,
                })
                .collect(),
            por_cultura: d
                .por_cultura
                .into_iter()
                .map(|s| CulturaStatDto {
                    cultura: s.cultura,
                    area_plantada: s.area_plantada,
                    quantidade: s.quantidade,
                    percentual: s.percentual,
                })
                .collect(),
            uso_do_solo: UsoDoSoloDto {
                area_agricultavel: d.uso_do_solo.area_agricultavel,
                area_vegetacao: d.uso_do_solo.area_vegetacao,
                percentual_agricultavel: d.uso_do_solo.percentual_agricultavel,
                percentual_vegetacao: d.uso_do_solo.percentual_vegetacao,
            },
        }
    }
}

//! Dashboard aggregation
//!
//! Storage backends produce a [`DashboardSnapshot`] of raw sums and counts;
//! [`Dashboard::from_snapshot`] derives percentages from it.

use serde::{Deserialize, Serialize};

use crate::value_objects::Uf;

/// Raw aggregates read from storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub total_fazendas: u64,
    pub total_hectares: f64,
    pub fazendas_por_estado: Vec<(Uf, u64)>,
    /// (crop name, planted hectares, number of cultivos)
    pub area_por_cultura: Vec<(String, f64, u64)>,
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstadoStat {
    pub estado: Uf,
    pub quantidade: u64,
    pub percentual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturaStat {
    pub cultura: String,
    pub area_plantada: f64,
    pub quantidade: u64,
    pub percentual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsoDoSolo {
    pub area_agricultavel: f64,
    pub area_vegetacao: f64,
    pub percentual_agricultavel: f64,
    pub percentual_vegetacao: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_fazendas: u64,
    pub total_hectares: f64,
    pub por_estado: Vec<EstadoStat>,
    pub por_cultura: Vec<CulturaStat>,
    pub uso_do_solo: UsoDoSolo,
}

impl Dashboard {
    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Self {
        let farms = snapshot.total_fazendas as f64;

        let mut por_estado: Vec<EstadoStat> = snapshot
            .fazendas_por_estado
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(estado, quantidade)| EstadoStat {
                estado,
                quantidade,
                percentual: percent(quantidade as f64, farms),
            })
            .collect();
        por_estado.sort_by(|a, b| {
            b.quantidade
                .cmp(&a.quantidade)
                .then_with(|| a.estado.code().cmp(b.estado.code()))
        });

        let planted: f64 = snapshot.area_por_cultura.iter().map(|(_, a, _)| a).sum();
        let mut por_cultura: Vec<CulturaStat> = snapshot
            .area_por_cultura
            .into_iter()
            .map(|(cultura, area_plantada, quantidade)| CulturaStat {
                percentual: percent(area_plantada, planted),
                cultura,
                area_plantada: round2(area_plantada),
                quantidade,
            })
            .collect();
        por_cultura.sort_by(|a, b| {
            b.area_plantada
                .total_cmp(&a.area_plantada)
                .then_with(|| a.cultura.cmp(&b.cultura))
        });

        let used = snapshot.area_agricultavel + snapshot.area_vegetacao;
        let uso_do_solo = UsoDoSolo {
            area_agricultavel: round2(snapshot.area_agricultavel),
            area_vegetacao: round2(snapshot.area_vegetacao),
            percentual_agricultavel: percent(snapshot.area_agricultavel, used),
            percentual_vegetacao: percent(snapshot.area_vegetacao, used),
        };

        Self {
            total_fazendas: snapshot.total_fazendas,
            total_hectares: round2(snapshot.total_hectares),
            por_estado,
            por_cultura,
            uso_do_solo,
        }
    }
}

/// `part / whole * 100` rounded to 2 decimals; 0 when `whole` is 0
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let d = Dashboard::from_snapshot(DashboardSnapshot::default());
        assert_eq!(d.total_fazendas, 0);
        assert!(d.por_estado.is_empty());
        assert_eq!(d.uso_do_solo.percentual_agricultavel, 0.0);
        assert_eq!(d.uso_do_solo.percentual_vegetacao, 0.0);
    }

    #[test]
    fn test_percentages_and_ordering() {
        let d = Dashboard::from_snapshot(DashboardSnapshot {
            total_fazendas: 3,
            total_hectares: 1500.0,
            fazendas_por_estado: vec![(Uf::GO, 1), (Uf::MT, 2)],
            area_por_cultura: vec![
                ("Milho".into(), 100.0, 1),
                ("Soja".into(), 300.0, 2),
            ],
            area_agricultavel: 900.0,
            area_vegetacao: 300.0,
        });

        assert_eq!(d.por_estado[0].estado, Uf::MT);
        assert_eq!(d.por_estado[0].percentual, 66.67);
        assert_eq!(d.por_estado[1].percentual, 33.33);

        assert_eq!(d.por_cultura[0].cultura, "Soja");
        assert_eq!(d.por_cultura[0].percentual, 75.0);
        assert_eq!(d.por_cultura[1].percentual, 25.0);

        assert_eq!(d.uso_do_solo.percentual_agricultavel, 75.0);
        assert_eq!(d.uso_do_solo.percentual_vegetacao, 25.0);
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(10.0, 0.0), 0.0);
        assert_eq!(percent(1.0, 3.0), 33.33);
    }
}

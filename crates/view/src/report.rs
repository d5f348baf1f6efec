use market_core::{ClassId, Trend};
use serde::Serialize;
use valuation::{FinalReport, RankLabel};

use crate::format;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub name: String,
    pub investment_label: String,
    pub caption: String,
    pub last_change_label: Option<String>,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformerCard {
    pub title: &'static str,
    pub name: String,
    pub amount_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub class_id: ClassId,
    pub title: String,
    pub total_label: String,
    pub rows: Vec<ReportRow>,
    pub highlights: Vec<PerformerCard>,
    pub report: FinalReport,
}

impl ReportView {
    pub fn new(class_id: ClassId, report: FinalReport) -> Self {
        let rows = report
            .ranking
            .iter()
            .map(|entry| ReportRow {
                rank: entry.rank,
                name: entry.name.clone(),
                investment_label: format::money(entry.investment),
                caption: caption(entry.label),
                last_change_label: (entry.last_change != 0.0)
                    .then(|| format::percent(entry.last_change)),
                trend: entry.trend,
            })
            .collect();

        let mut highlights = Vec::with_capacity(3);
        if let Some(best) = &report.best {
            highlights.push(PerformerCard {
                title: "Melhor Performance",
                name: best.name.clone(),
                amount_label: format::money(best.investment),
            });
        }
        highlights.push(PerformerCard {
            title: "Investimento Médio",
            name: "Por empresa".to_string(),
            amount_label: format::money(report.average),
        });
        if let Some(worst) = &report.worst {
            highlights.push(PerformerCard {
                title: "Menor Performance",
                name: worst.name.clone(),
                amount_label: format::money(worst.investment),
            });
        }

        Self {
            class_id,
            title: format!("Relatório Final - Turma {class_id}"),
            total_label: format::money(report.total),
            rows,
            highlights,
            report,
        }
    }
}

fn caption(label: RankLabel) -> String {
    match label {
        RankLabel::Best => "Empresa mais valorizada".to_string(),
        RankLabel::Worst => "Menor valorização".to_string(),
        RankLabel::Place(place) => format!("{place}º lugar no ranking"),
    }
}

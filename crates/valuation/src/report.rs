use market_core::{Company, Trend};
use serde::Serialize;

use crate::portfolio::total_investment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "place", rename_all = "snake_case")]
pub enum RankLabel {
    Best,
    Worst,
    Place(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCompany {
    pub rank: usize,
    pub name: String,
    pub investment: f64,
    pub last_change: f64,
    pub trend: Trend,
    pub label: RankLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performer {
    pub name: String,
    pub investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalReport {
    pub ranking: Vec<RankedCompany>,
    pub total: f64,
    pub average: f64,
    pub best: Option<Performer>,
    pub worst: Option<Performer>,
}

impl FinalReport {
    pub fn from_companies(companies: &[Company]) -> Self {
        let mut sorted: Vec<&Company> = companies.iter().collect();
        sorted.sort_by(|left, right| right.investment.total_cmp(&left.investment));

        let total = total_investment(companies);
        let average = if companies.is_empty() {
            0.0
        } else {
            total / companies.len() as f64
        };
        let last = sorted.len().saturating_sub(1);

        let ranking: Vec<RankedCompany> = sorted
            .iter()
            .enumerate()
            .map(|(index, company)| RankedCompany {
                rank: index + 1,
                name: company.name.clone(),
                investment: company.investment,
                last_change: company.last_change,
                trend: company.trend,
                label: match index {
                    0 => RankLabel::Best,
                    index if index == last => RankLabel::Worst,
                    index => RankLabel::Place(index + 1),
                },
            })
            .collect();

        let performer = |entry: &RankedCompany| Performer {
            name: entry.name.clone(),
            investment: entry.investment,
        };

        Self {
            best: ranking.first().map(performer),
            worst: ranking.last().map(performer),
            ranking,
            total,
            average,
        }
    }
}

#[cfg(test)]
mod tests {
    use market_core::Company;

    use super::{FinalReport, RankLabel};

    fn company(name: &str, investment: f64) -> Company {
        let mut company = Company::new(name);
        company.investment = investment;
        company
    }

    #[test]
    fn ranks_two_companies_by_investment() {
        let report =
            FinalReport::from_companies(&[company("SMARTAL", 200.0), company("ECOSOL", 800.0)]);

        assert_eq!(report.ranking[0].name, "ECOSOL");
        assert_eq!(report.ranking[0].label, RankLabel::Best);
        assert_eq!(report.ranking[1].label, RankLabel::Worst);
        assert_eq!(report.total, 1_000.0);
        assert_eq!(report.average, 500.0);
        assert_eq!(report.best.unwrap().name, "ECOSOL");
        assert_eq!(report.worst.unwrap().investment, 200.0);
    }

    #[test]
    fn middle_entries_get_place_labels() {
        let report = FinalReport::from_companies(&[
            company("A", 10.0),
            company("B", 30.0),
            company("C", 20.0),
            company("D", 40.0),
        ]);

        let labels: Vec<RankLabel> = report.ranking.iter().map(|entry| entry.label).collect();
        assert_eq!(
            labels,
            vec![
                RankLabel::Best,
                RankLabel::Place(2),
                RankLabel::Place(3),
                RankLabel::Worst,
            ]
        );
        assert_eq!(report.ranking[1].name, "B");
    }

    #[test]
    fn ties_keep_registry_order() {
        let report = FinalReport::from_companies(&[company("A", 0.0), company("B", 0.0)]);

        assert_eq!(report.ranking[0].name, "A");
        assert_eq!(report.ranking[1].name, "B");
    }

    #[test]
    fn single_company_is_best() {
        let report = FinalReport::from_companies(&[company("ONLY", 5.0)]);

        assert_eq!(report.ranking[0].label, RankLabel::Best);
        assert_eq!(report.worst.unwrap().name, "ONLY");
    }

    #[test]
    fn empty_report_has_zero_average() {
        let report = FinalReport::from_companies(&[]);

        assert!(report.ranking.is_empty());
        assert_eq!(report.average, 0.0);
        assert!(report.best.is_none());
    }

    #[test]
    fn rank_label_serializes_with_kind_tag() {
        let json = serde_json::to_value(RankLabel::Place(3)).unwrap();

        assert_eq!(json, serde_json::json!({ "kind": "place", "place": 3 }));
    }
}

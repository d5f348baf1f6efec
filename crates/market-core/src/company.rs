use serde::{Deserialize, Serialize};

use crate::registry::ClassId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub investment: f64,
    pub last_change: f64,
    pub trend: Trend,
    pub history: Vec<HistoryPoint>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            investment: 0.0,
            last_change: 0.0,
            trend: Trend::Neutral,
            history: vec![HistoryPoint {
                time: time_label(0),
                value: 0.0,
            }],
        }
    }

    /// Moves the holding to `new_investment` and records the change under `label`.
    pub fn record_change(&mut self, new_investment: f64, last_change: f64, label: String) {
        let delta = new_investment - self.investment;
        self.investment = new_investment;
        self.last_change = last_change;
        self.trend = Trend::from_delta(delta);
        self.history.push(HistoryPoint {
            time: label,
            value: new_investment,
        });
    }
}

pub fn companies_for(class: ClassId) -> Vec<Company> {
    class.companies().iter().copied().map(Company::new).collect()
}

/// Formats elapsed market seconds as `m:ss`.
pub fn time_label(elapsed_seconds: u32) -> String {
    format!("{}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_companies_start_flat_with_origin_point() {
        let companies = companies_for(ClassId::NineA);

        assert_eq!(companies.len(), 5);
        assert_eq!(companies[0].name, "ECOSOL");
        for company in &companies {
            assert_eq!(company.investment, 0.0);
            assert_eq!(company.trend, Trend::Neutral);
            assert_eq!(
                company.history,
                vec![HistoryPoint {
                    time: "0:00".to_string(),
                    value: 0.0,
                }]
            );
        }
    }

    #[test]
    fn time_label_pads_seconds() {
        assert_eq!(time_label(0), "0:00");
        assert_eq!(time_label(9), "0:09");
        assert_eq!(time_label(75), "1:15");
        assert_eq!(time_label(600), "10:00");
    }

    #[test]
    fn record_change_sets_trend_from_direction() {
        let mut company = Company::new("ECOSOL");

        company.record_change(500.0, 50_000.0, time_label(3));
        assert_eq!(company.trend, Trend::Up);

        company.record_change(400.0, -20.0, time_label(4));
        assert_eq!(company.trend, Trend::Down);
        assert_eq!(company.history.len(), 3);
        assert_eq!(company.history[2].value, 400.0);
    }
}

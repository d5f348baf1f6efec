use market_core::Company;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total: f64,
    pub baseline: Option<f64>,
    pub change_pct: f64,
}

/// Remembers the first nonzero portfolio total and reports change against it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PortfolioTracker {
    baseline: Option<f64>,
}

impl PortfolioTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, companies: &[Company]) -> PortfolioSummary {
        let total = total_investment(companies);
        if self.baseline.is_none() && total > 0.0 {
            self.baseline = Some(total);
        }
        self.summarize(total)
    }

    /// Summary for `total` without capturing a baseline.
    pub fn summarize(&self, total: f64) -> PortfolioSummary {
        let change_pct = match self.baseline {
            Some(baseline) if baseline > 0.0 => (total - baseline) / baseline * 100.0,
            _ => 0.0,
        };

        PortfolioSummary {
            total,
            baseline: self.baseline,
            change_pct,
        }
    }
}

pub fn total_investment(companies: &[Company]) -> f64 {
    companies.iter().map(|company| company.investment).sum()
}

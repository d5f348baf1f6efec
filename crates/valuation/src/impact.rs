use market_core::{Company, Polarity, RandomSource, SimConfig};
use serde::Serialize;

/// Half-open range `[min_pct, max_pct)` an event impact is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRange {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl From<&SimConfig> for ImpactRange {
    fn from(config: &SimConfig) -> Self {
        Self {
            min_pct: config.min_impact_pct,
            max_pct: config.max_impact_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revaluation {
    pub company: String,
    pub previous: f64,
    pub current: f64,
    pub change_pct: f64,
}

/// Applies one event to every affected company that holds investment.
pub fn apply_event(
    companies: &mut [Company],
    affected: &[&str],
    polarity: Polarity,
    range: ImpactRange,
    label: &str,
    rng: &mut dyn RandomSource,
) -> Vec<Revaluation> {
    companies
        .iter_mut()
        .filter(|company| affected.iter().any(|name| *name == company.name))
        .filter(|company| company.investment > 0.0)
        .filter_map(|company| {
            let impact_pct = rng.uniform(range.min_pct, range.max_pct);
            apply_impact(company, polarity, impact_pct, label)
        })
        .collect()
}

/// Moves a single holding by `impact_pct` in the direction of `polarity`.
pub fn apply_impact(
    company: &mut Company,
    polarity: Polarity,
    impact_pct: f64,
    label: &str,
) -> Option<Revaluation> {
    let previous = company.investment;
    if previous <= 0.0 || !impact_pct.is_finite() {
        return None;
    }

    let factor = impact_pct / 100.0;
    let current = match polarity {
        Polarity::Positive => previous * (1.0 + factor),
        Polarity::Negative => (previous * (1.0 - factor)).max(0.0),
    };
    let change_pct = (current - previous) / previous * 100.0;

    company.record_change(current, change_pct, label.to_owned());

    Some(Revaluation {
        company: company.name.clone(),
        previous,
        current,
        change_pct,
    })
}

use serde::Serialize;
use session::{EventRecord, MarketSession};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

pub fn company_series(session: &MarketSession, index: usize) -> Option<ChartSeries> {
    let company = session.companies().get(index)?;

    Some(ChartSeries {
        title: format!("Histórico de {}", company.name),
        points: company
            .history
            .iter()
            .map(|point| ChartPoint {
                time: point.time.clone(),
                value: point.value,
                change_pct: None,
            })
            .collect(),
    })
}

pub fn portfolio_series(session: &MarketSession) -> ChartSeries {
    ChartSeries {
        title: "Histórico da Carteira de Investimentos".to_string(),
        points: session
            .portfolio_history()
            .iter()
            .map(|point| ChartPoint {
                time: point.time.clone(),
                value: point.value,
                change_pct: Some(point.change_pct),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHistoryView {
    pub events: Vec<EventRecord>,
}

/// Most recent event first.
pub fn event_history(session: &MarketSession) -> EventHistoryView {
    EventHistoryView {
        events: session.event_log().iter().rev().cloned().collect(),
    }
}

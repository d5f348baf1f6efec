use market_core::{time_label, ClassId, Company, Polarity, Trend};
use serde::Serialize;
use session::MarketSession;

use crate::format;

/// Amounts offered on every company card.
pub const INVESTMENT_PRESETS: [f64; 4] = [100.0, 500.0, -100.0, -500.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionButton {
    pub amount: f64,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCard {
    pub index: usize,
    pub name: String,
    pub investment: f64,
    pub investment_label: String,
    pub last_change: Option<f64>,
    pub last_change_label: Option<String>,
    pub trend: Trend,
    pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockView {
    pub elapsed_seconds: u32,
    pub label: String,
    pub next_event_in: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub balance: f64,
    pub balance_label: String,
    pub portfolio_total: f64,
    pub portfolio_label: String,
    pub change_pct: f64,
    pub change_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBanner {
    pub text: String,
    pub polarity: Polarity,
    pub affected: Vec<String>,
    pub remaining_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketView {
    pub class_id: ClassId,
    pub generation: u64,
    pub market_active: bool,
    pub paused: bool,
    pub clock: ClockView,
    pub summary: SummaryView,
    pub event: Option<EventBanner>,
    pub companies: Vec<CompanyCard>,
}

impl MarketView {
    pub fn from_session(session: &MarketSession) -> Self {
        let trading_open = session.is_market_active() && !session.is_event_active();
        let summary = session.portfolio_summary();

        let next_event_in = trading_open.then(|| {
            let since_last = session.elapsed_seconds() - session.last_event_at();
            session
                .config()
                .event_interval_secs
                .saturating_sub(since_last)
        });

        Self {
            class_id: session.class(),
            generation: session.generation(),
            market_active: session.is_market_active(),
            paused: session.is_event_active(),
            clock: ClockView {
                elapsed_seconds: session.elapsed_seconds(),
                label: time_label(session.elapsed_seconds()),
                next_event_in,
            },
            summary: SummaryView {
                balance: session.balance(),
                balance_label: format::money(session.balance()),
                portfolio_total: summary.total,
                portfolio_label: format::money(summary.total),
                change_pct: summary.change_pct,
                change_label: format::percent(summary.change_pct),
            },
            event: session.current_event().map(|active| EventBanner {
                text: active.event.text.to_owned(),
                polarity: active.event.polarity,
                affected: active.affected.clone(),
                remaining_secs: active.remaining_secs,
            }),
            companies: session
                .companies()
                .iter()
                .enumerate()
                .map(|(index, company)| company_card(index, company, trading_open))
                .collect(),
        }
    }
}

fn company_card(index: usize, company: &Company, trading_open: bool) -> CompanyCard {
    let actions = INVESTMENT_PRESETS
        .iter()
        .map(|&amount| ActionButton {
            amount,
            label: format::preset(amount),
            // Oversized buys stay clickable so the balance error can be reported.
            enabled: trading_open && (amount > 0.0 || company.investment >= -amount),
        })
        .collect();
    let last_change = (company.last_change != 0.0).then_some(company.last_change);

    CompanyCard {
        index,
        name: company.name.clone(),
        investment: company.investment,
        investment_label: format::money(company.investment),
        last_change,
        last_change_label: last_change.map(format::percent),
        trend: company.trend,
        actions,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassOption {
    pub class_id: ClassId,
    pub name: String,
    pub companies: Vec<String>,
}

/// Class selection screen contents.
pub fn class_options() -> Vec<ClassOption> {
    ClassId::ALL
        .iter()
        .map(|class| ClassOption {
            class_id: *class,
            name: format!("Turma {class}"),
            companies: class.companies().iter().map(|name| (*name).to_owned()).collect(),
        })
        .collect()
}

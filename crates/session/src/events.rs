use market_core::Polarity;
use serde::Serialize;
use valuation::{InvestmentReceipt, Revaluation};

/// Everything a tick or user action changed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    ClockAdvanced {
        elapsed_seconds: u32,
    },
    EventFired {
        elapsed_seconds: u32,
        text: String,
        polarity: Polarity,
        affected: Vec<String>,
    },
    CompanyRevalued(Revaluation),
    PortfolioUpdated {
        elapsed_seconds: u32,
        total: f64,
        change_pct: f64,
    },
    EventCleared {
        elapsed_seconds: u32,
        text: String,
    },
    MarketClosed {
        elapsed_seconds: u32,
    },
    InvestmentApplied(InvestmentReceipt),
    InvestmentRejected {
        company_index: usize,
        amount: f64,
        reason: String,
    },
    SessionReset {
        generation: u64,
    },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClockAdvanced { .. } => "clock_advanced",
            Self::EventFired { .. } => "event_fired",
            Self::CompanyRevalued(_) => "company_revalued",
            Self::PortfolioUpdated { .. } => "portfolio_updated",
            Self::EventCleared { .. } => "event_cleared",
            Self::MarketClosed { .. } => "market_closed",
            Self::InvestmentApplied(_) => "investment_applied",
            Self::InvestmentRejected { .. } => "investment_rejected",
            Self::SessionReset { .. } => "session_reset",
        }
    }
}

//! Display-ready snapshots of a classroom market session.

pub mod charts;
mod format;
pub mod market;
pub mod report;

pub use charts::{
    company_series, event_history, portfolio_series, ChartPoint, ChartSeries, EventHistoryView,
};
pub use format::{money, percent};
pub use market::{
    class_options, ActionButton, ClassOption, ClockView, CompanyCard, EventBanner, MarketView,
    SummaryView, INVESTMENT_PRESETS,
};
pub use report::{PerformerCard, ReportRow, ReportView};

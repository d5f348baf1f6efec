mod catalog;
mod company;
mod config;
mod generators;
mod registry;

pub use catalog::{
    affected_companies, draw_event, events_for, MarketEvent, Polarity, NEGATIVE_EVENTS,
    POSITIVE_EVENTS,
};
pub use company::{companies_for, time_label, Company, HistoryPoint, Trend};
pub use config::SimConfig;
pub use generators::{RandomSource, RngSource, ScriptedRandom};
pub use registry::{ClassId, UnknownClassError};

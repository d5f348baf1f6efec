use serde::{Deserialize, Serialize};

/// Tunables for one classroom session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub initial_balance: f64,
    pub event_interval_secs: u32,
    pub event_window_secs: u32,
    pub negative_event_probability: f64,
    pub min_impact_pct: f64,
    pub max_impact_pct: f64,
    pub market_duration_secs: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_balance: 2_000.0,
            event_interval_secs: 15,
            event_window_secs: 7,
            negative_event_probability: 0.6,
            min_impact_pct: 1.0,
            max_impact_pct: 4.0,
            market_duration_secs: None,
        }
    }
}

impl SimConfig {
    pub fn with_initial_balance(mut self, initial_balance: f64) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    pub fn with_market_duration_secs(mut self, market_duration_secs: u32) -> Self {
        self.market_duration_secs = Some(market_duration_secs);
        self
    }
}

use market_core::{
    affected_companies, companies_for, draw_event, time_label, ClassId, Company, MarketEvent,
    RandomSource, SimConfig,
};
use serde::Serialize;
use valuation::{
    apply_event, apply_investment, total_investment, FinalReport, ImpactRange, InvestmentError,
    InvestmentReceipt, PortfolioSummary, PortfolioTracker,
};

use crate::{
    events::SessionEvent,
    history::{EventRecord, PortfolioPoint},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("the market is closed")]
    MarketClosed,
    #[error("trading is paused while a market event is active")]
    EventActive,
    #[error(transparent)]
    Investment(#[from] InvestmentError),
}

impl ActionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MarketClosed => "market_closed",
            Self::EventActive => "event_active",
            Self::Investment(err) => err.code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveEvent {
    pub event: MarketEvent,
    pub affected: Vec<String>,
    pub started_at: u32,
    pub remaining_secs: u32,
}

/// State of one class's market, advanced by [`MarketSession::tick`] and user actions.
#[derive(Debug, Clone)]
pub struct MarketSession {
    class: ClassId,
    config: SimConfig,
    generation: u64,
    elapsed_seconds: u32,
    balance: f64,
    market_active: bool,
    last_event_at: u32,
    current_event: Option<ActiveEvent>,
    companies: Vec<Company>,
    event_log: Vec<EventRecord>,
    portfolio: PortfolioTracker,
    portfolio_history: Vec<PortfolioPoint>,
}

impl MarketSession {
    pub fn new(class: ClassId, config: SimConfig) -> Self {
        Self::with_generation(class, config, 0)
    }

    fn with_generation(class: ClassId, config: SimConfig, generation: u64) -> Self {
        Self {
            class,
            config,
            generation,
            elapsed_seconds: 0,
            balance: config.initial_balance,
            market_active: true,
            last_event_at: 0,
            current_event: None,
            companies: companies_for(class),
            event_log: Vec::new(),
            portfolio: PortfolioTracker::new(),
            portfolio_history: Vec::new(),
        }
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn is_market_active(&self) -> bool {
        self.market_active
    }

    pub fn is_event_active(&self) -> bool {
        self.current_event.is_some()
    }

    pub fn current_event(&self) -> Option<&ActiveEvent> {
        self.current_event.as_ref()
    }

    pub fn last_event_at(&self) -> u32 {
        self.last_event_at
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn event_log(&self) -> &[EventRecord] {
        &self.event_log
    }

    pub fn portfolio_history(&self) -> &[PortfolioPoint] {
        &self.portfolio_history
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.portfolio.summarize(total_investment(&self.companies))
    }

    pub fn report(&self) -> FinalReport {
        FinalReport::from_companies(&self.companies)
    }

    /// Advances the market by one second of wall-clock time.
    ///
    /// A tick that starts inside an event window only counts the window down;
    /// the clock resumes on the tick after the window closes.
    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> Vec<SessionEvent> {
        if !self.market_active {
            return Vec::new();
        }

        if let Some(active) = &mut self.current_event {
            active.remaining_secs = active.remaining_secs.saturating_sub(1);
            if active.remaining_secs > 0 {
                return Vec::new();
            }
            let text = active.event.text.to_owned();
            self.current_event = None;
            return vec![SessionEvent::EventCleared {
                elapsed_seconds: self.elapsed_seconds,
                text,
            }];
        }

        self.elapsed_seconds += 1;
        let mut events = vec![SessionEvent::ClockAdvanced {
            elapsed_seconds: self.elapsed_seconds,
        }];

        if let Some(limit) = self.config.market_duration_secs {
            if self.elapsed_seconds >= limit {
                self.market_active = false;
                events.push(SessionEvent::MarketClosed {
                    elapsed_seconds: self.elapsed_seconds,
                });
                return events;
            }
        }

        if self.elapsed_seconds - self.last_event_at >= self.config.event_interval_secs {
            self.fire_event(rng, &mut events);
        }

        events
    }

    fn fire_event(&mut self, rng: &mut dyn RandomSource, events: &mut Vec<SessionEvent>) {
        let event = draw_event(rng, self.config.negative_event_probability);
        let affected = affected_companies(self.class, event.text);
        let label = time_label(self.elapsed_seconds);

        let revaluations = apply_event(
            &mut self.companies,
            affected,
            event.polarity,
            ImpactRange::from(&self.config),
            &label,
            rng,
        );

        tracing::info!(
            class = %self.class,
            elapsed = self.elapsed_seconds,
            polarity = event.polarity.as_str(),
            text = event.text,
            affected = affected.len(),
            revalued = revaluations.len(),
            "market event fired"
        );

        let affected: Vec<String> = affected.iter().map(|name| (*name).to_owned()).collect();
        self.last_event_at = self.elapsed_seconds;
        self.current_event = Some(ActiveEvent {
            event,
            affected: affected.clone(),
            started_at: self.elapsed_seconds,
            remaining_secs: self.config.event_window_secs,
        });
        self.event_log.push(EventRecord {
            time: label.clone(),
            elapsed_seconds: self.elapsed_seconds,
            text: event.text.to_owned(),
            polarity: event.polarity,
            affected: affected.clone(),
        });

        events.push(SessionEvent::EventFired {
            elapsed_seconds: self.elapsed_seconds,
            text: event.text.to_owned(),
            polarity: event.polarity,
            affected,
        });
        events.extend(revaluations.into_iter().map(SessionEvent::CompanyRevalued));
        events.push(self.record_portfolio_point(label));
    }

    /// Buys or sells; the whole action is discarded on any rejection.
    pub fn invest(
        &mut self,
        company_index: usize,
        amount: f64,
    ) -> Result<InvestmentReceipt, ActionError> {
        if !self.market_active {
            return Err(ActionError::MarketClosed);
        }
        if self.is_event_active() {
            return Err(ActionError::EventActive);
        }

        let label = time_label(self.elapsed_seconds);
        let receipt = apply_investment(
            &mut self.companies,
            self.balance,
            company_index,
            amount,
            label.clone(),
        )?;
        self.balance = receipt.balance;
        self.record_portfolio_point(label);

        Ok(receipt)
    }

    /// Closes the market and produces the ranking. Calling it again is harmless.
    pub fn end_market(&mut self) -> FinalReport {
        if self.market_active {
            self.market_active = false;
            self.current_event = None;
            tracing::info!(class = %self.class, elapsed = self.elapsed_seconds, "market ended");
        }
        self.report()
    }

    /// Starts a new simulation for the same class.
    pub fn reset(&mut self) -> SessionEvent {
        *self = Self::with_generation(self.class, self.config, self.generation + 1);
        tracing::info!(class = %self.class, generation = self.generation, "session reset");

        SessionEvent::SessionReset {
            generation: self.generation,
        }
    }

    fn record_portfolio_point(&mut self, time: String) -> SessionEvent {
        let summary = self.portfolio.observe(&self.companies);
        self.portfolio_history.push(PortfolioPoint {
            time,
            value: summary.total,
            change_pct: summary.change_pct,
        });

        SessionEvent::PortfolioUpdated {
            elapsed_seconds: self.elapsed_seconds,
            total: summary.total,
            change_pct: summary.change_pct,
        }
    }
}

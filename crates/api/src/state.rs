use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use market_core::{ClassId, RandomSource, RngSource, SimConfig};
use parking_lot::Mutex;
use session::{EventRecord, MarketSession, RunLogWriter, SessionEvent, TracingRunLogWriter};
use tokio::sync::broadcast;
use view::{MarketView, ReportView};

use crate::{driver, error::ApiError, export};

pub type SessionId = u64;

#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    Connected {
        session_id: Option<SessionId>,
    },
    SessionStarted {
        session_id: SessionId,
        class_id: ClassId,
    },
    SessionClosed {
        session_id: SessionId,
    },
    Session {
        session_id: SessionId,
        generation: u64,
        event: SessionEvent,
    },
}

impl RuntimeEvent {
    pub fn connected(session_id: Option<SessionId>) -> Self {
        Self::Connected { session_id }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Self::Connected { session_id } => *session_id,
            Self::SessionStarted { session_id, .. }
            | Self::SessionClosed { session_id }
            | Self::Session { session_id, .. } => Some(*session_id),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppSettings {
    pub sim: SimConfig,
    /// Fixed seed for reproducible classes; each session offsets it by its id.
    pub rng_seed: Option<u64>,
    pub history_output: Option<PathBuf>,
    pub tick_period: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            rng_seed: None,
            history_output: None,
            tick_period: Duration::from_secs(1),
        }
    }
}

pub struct SessionSlot {
    pub session: MarketSession,
    rng: Box<dyn RandomSource + Send>,
}

impl SessionSlot {
    fn tick(&mut self) -> Vec<SessionEvent> {
        self.session.tick(&mut *self.rng)
    }
}

/// Event log of a market that just closed, waiting to be exported.
#[derive(Debug)]
pub(crate) struct ClosedMarket {
    pub class: ClassId,
    pub records: Vec<EventRecord>,
}

pub(crate) enum ClockStep {
    Running,
    Closed(ClosedMarket),
    Stopped(&'static str),
}

#[derive(Clone)]
pub struct AppState {
    next_session_id: Arc<AtomicU64>,
    sessions: Arc<Mutex<HashMap<SessionId, SessionSlot>>>,
    events_tx: broadcast::Sender<RuntimeEvent>,
    settings: Arc<AppSettings>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            next_session_id: Arc::new(AtomicU64::new(0)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            events_tx,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.events_tx.subscribe()
    }

    pub fn publish_event(
        &self,
        event: RuntimeEvent,
    ) -> Result<usize, broadcast::error::SendError<RuntimeEvent>> {
        self.events_tx.send(event)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Selects a class: builds the session and starts its clock.
    pub fn create_session(&self, class: ClassId) -> Result<(SessionId, MarketView), ApiError> {
        let previous = self
            .next_session_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_add(1)
            })
            .map_err(|_| ApiError::SessionIdOverflow)?;
        let session_id = previous + 1;

        let session = MarketSession::new(class, self.settings.sim);
        let view = MarketView::from_session(&session);
        let generation = session.generation();
        let slot = SessionSlot {
            session,
            rng: self.session_rng(session_id),
        };
        {
            let mut sessions = self.sessions.lock();
            sessions.insert(session_id, slot);
            tracing::info!(session_id, class = %class, "session created");
            let _ = self.publish_event(RuntimeEvent::SessionStarted {
                session_id,
                class_id: class,
            });
        }
        driver::spawn_clock(self.clone(), session_id, generation);

        Ok((session_id, view))
    }

    pub fn read<R>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&MarketSession) -> R,
    ) -> Result<R, ApiError> {
        let sessions = self.sessions.lock();
        let slot = sessions
            .get(&session_id)
            .ok_or(ApiError::SessionNotFound(session_id))?;

        Ok(f(&slot.session))
    }

    pub fn invest(
        &self,
        session_id: SessionId,
        company_index: usize,
        amount: f64,
    ) -> Result<MarketView, ApiError> {
        let mut sessions = self.sessions.lock();
        let slot = sessions
            .get_mut(&session_id)
            .ok_or(ApiError::SessionNotFound(session_id))?;
        let outcome = slot.session.invest(company_index, amount);

        let event = match &outcome {
            Ok(receipt) => SessionEvent::InvestmentApplied(receipt.clone()),
            Err(err) => SessionEvent::InvestmentRejected {
                company_index,
                amount,
                reason: err.code().to_string(),
            },
        };
        self.publish_session_events(session_id, &slot.session, vec![event]);

        outcome?;
        Ok(MarketView::from_session(&slot.session))
    }

    /// Closes the market; the event history is exported only on the first close.
    pub async fn end_market(&self, session_id: SessionId) -> Result<ReportView, ApiError> {
        let (class, report, closed) = {
            let mut sessions = self.sessions.lock();
            let slot = sessions
                .get_mut(&session_id)
                .ok_or(ApiError::SessionNotFound(session_id))?;
            let was_active = slot.session.is_market_active();
            let report = slot.session.end_market();
            let closed = was_active.then(|| {
                let event = SessionEvent::MarketClosed {
                    elapsed_seconds: slot.session.elapsed_seconds(),
                };
                self.publish_session_events(session_id, &slot.session, vec![event]);
                ClosedMarket {
                    class: slot.session.class(),
                    records: slot.session.event_log().to_vec(),
                }
            });
            (slot.session.class(), report, closed)
        };

        if let Some(closed) = closed {
            self.export_history(closed).await;
        }

        Ok(ReportView::new(class, report))
    }

    /// Starts a new simulation for the same class; the previous clock retires itself.
    pub fn reset(&self, session_id: SessionId) -> Result<MarketView, ApiError> {
        let (generation, view) = {
            let mut sessions = self.sessions.lock();
            let slot = sessions
                .get_mut(&session_id)
                .ok_or(ApiError::SessionNotFound(session_id))?;
            let event = slot.session.reset();
            self.publish_session_events(session_id, &slot.session, vec![event]);
            (
                slot.session.generation(),
                MarketView::from_session(&slot.session),
            )
        };

        driver::spawn_clock(self.clone(), session_id, generation);

        Ok(view)
    }

    pub fn remove(&self, session_id: SessionId) -> Result<(), ApiError> {
        let mut sessions = self.sessions.lock();
        if sessions.remove(&session_id).is_none() {
            return Err(ApiError::SessionNotFound(session_id));
        }

        tracing::info!(session_id, "session closed");
        let _ = self.publish_event(RuntimeEvent::SessionClosed { session_id });
        Ok(())
    }

    pub(crate) fn tick_session(&self, session_id: SessionId, generation: u64) -> ClockStep {
        let mut sessions = self.sessions.lock();
        let Some(slot) = sessions.get_mut(&session_id) else {
            return ClockStep::Stopped("session removed");
        };
        if slot.session.generation() != generation {
            return ClockStep::Stopped("session reset");
        }
        if !slot.session.is_market_active() {
            return ClockStep::Stopped("market closed");
        }

        let events = slot.tick();
        self.publish_session_events(session_id, &slot.session, events);

        if slot.session.is_market_active() {
            ClockStep::Running
        } else {
            ClockStep::Closed(ClosedMarket {
                class: slot.session.class(),
                records: slot.session.event_log().to_vec(),
            })
        }
    }

    pub(crate) async fn export_history(&self, closed: ClosedMarket) {
        let Some(path) = self.settings.history_output.clone() else {
            return;
        };

        let ClosedMarket { class, records } = closed;
        let count = records.len();
        let written = tokio::task::spawn_blocking(move || {
            export::append_event_history(&path, class, &records)
        })
        .await;

        match written {
            Ok(Ok(())) => tracing::debug!(class = %class, events = count, "history exported"),
            Ok(Err(err)) => tracing::warn!(class = %class, error = %err, "history export failed"),
            Err(err) => tracing::warn!(class = %class, error = %err, "history export panicked"),
        }
    }

    /// Callers hold the registry lock, so each session's events reach
    /// subscribers in the order the session produced them.
    fn publish_session_events(
        &self,
        session_id: SessionId,
        session: &MarketSession,
        events: Vec<SessionEvent>,
    ) {
        let generation = session.generation();
        TracingRunLogWriter::new(session_id, session.class()).write_all(&events);
        for event in events {
            let _ = self.publish_event(RuntimeEvent::Session {
                session_id,
                generation,
                event,
            });
        }
    }

    fn session_rng(&self, session_id: SessionId) -> Box<dyn RandomSource + Send> {
        match self.settings.rng_seed {
            Some(seed) => Box::new(RngSource::seeded(seed.wrapping_add(session_id))),
            None => Box::new(RngSource::from_entropy()),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_session_rng_for_test(
        &self,
        session_id: SessionId,
        rng: impl RandomSource + Send + 'static,
    ) {
        if let Some(slot) = self.sessions.lock().get_mut(&session_id) {
            slot.rng = Box::new(rng);
        }
    }

    #[cfg(test)]
    pub(crate) fn with_next_session_id_for_test(next_session_id: u64) -> Self {
        let state = Self::new();
        state
            .next_session_id
            .store(next_session_id, Ordering::Relaxed);
        state
    }

    #[cfg(test)]
    pub(crate) fn tick_for_test(&self, session_id: SessionId, ticks: u32) {
        let mut sessions = self.sessions.lock();
        if let Some(slot) = sessions.get_mut(&session_id) {
            for _ in 0..ticks {
                slot.tick();
            }
        }
    }
}

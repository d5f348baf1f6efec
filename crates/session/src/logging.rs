use market_core::ClassId;

use crate::events::SessionEvent;

pub trait RunLogWriter {
    fn write(&mut self, event: &SessionEvent);

    fn write_all(&mut self, events: &[SessionEvent]) {
        for event in events {
            self.write(event);
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<SessionEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards session events to `tracing`, tagged with the session they belong to.
#[derive(Debug, Clone, Copy)]
pub struct TracingRunLogWriter {
    session_id: u64,
    class: ClassId,
}

impl TracingRunLogWriter {
    pub fn new(session_id: u64, class: ClassId) -> Self {
        Self { session_id, class }
    }
}

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::ClockAdvanced { elapsed_seconds } => tracing::trace!(
                session_id = self.session_id,
                class = %self.class,
                elapsed = elapsed_seconds,
                "clock advanced"
            ),
            SessionEvent::InvestmentRejected { reason, amount, .. } => tracing::warn!(
                session_id = self.session_id,
                class = %self.class,
                amount,
                reason = reason.as_str(),
                "investment rejected"
            ),
            other => tracing::debug!(
                session_id = self.session_id,
                class = %self.class,
                kind = other.kind(),
                "session event"
            ),
        }
    }
}

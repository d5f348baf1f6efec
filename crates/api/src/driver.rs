use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::state::{AppState, ClockStep, SessionId};

/// Drives one session generation at the configured tick period until it is
/// removed, reset or closed.
pub(crate) fn spawn_clock(
    state: AppState,
    session_id: SessionId,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(run_clock(state, session_id, generation))
}

async fn run_clock(state: AppState, session_id: SessionId, generation: u64) {
    let period = state.settings().tick_period;
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reason = loop {
        interval.tick().await;
        match state.tick_session(session_id, generation) {
            ClockStep::Running => {}
            ClockStep::Closed(closed) => {
                state.export_history(closed).await;
                break "market closed";
            }
            ClockStep::Stopped(reason) => break reason,
        }
    };

    tracing::debug!(session_id, generation, reason, "clock driver stopped");
}

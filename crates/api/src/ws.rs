use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::state::{AppState, RuntimeEvent, SessionId};

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub session_id: Option<SessionId>,
}

pub async fn events_socket(
    ws: WebSocketUpgrade,
    Query(filter): Query<EventFilter>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| stream_events(socket, state, filter))
}

async fn stream_events(mut socket: WebSocket, state: AppState, filter: EventFilter) {
    // Subscribe before greeting so nothing published after `connected` is missed.
    let mut events = state.subscribe_events();
    let connected = RuntimeEvent::connected(filter.session_id);
    if send_event(&mut socket, &connected).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return,
                    Some(Ok(_)) => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) if wanted(&filter, &event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "websocket subscriber lagged");
                    }
                    Err(RecvError::Closed) => return,
                }
            }
        }
    }
}

fn wanted(filter: &EventFilter, event: &RuntimeEvent) -> bool {
    match filter.session_id {
        Some(session_id) => event.session_id() == Some(session_id),
        None => true,
    }
}

async fn send_event(socket: &mut WebSocket, event: &RuntimeEvent) -> Result<(), ()> {
    let payload = serde_json::to_string(event).map_err(|_| ())?;
    socket.send(Message::Text(payload)).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::{wanted, EventFilter};
    use crate::state::RuntimeEvent;

    #[test]
    fn filter_keeps_only_matching_session() {
        let filter = EventFilter {
            session_id: Some(2),
        };

        assert!(wanted(&filter, &RuntimeEvent::SessionClosed { session_id: 2 }));
        assert!(!wanted(&filter, &RuntimeEvent::SessionClosed { session_id: 3 }));
        assert!(wanted(
            &EventFilter::default(),
            &RuntimeEvent::SessionClosed { session_id: 3 }
        ));
    }
}

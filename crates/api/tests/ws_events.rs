use std::time::Duration;

use api::{app, AppState};
use futures_util::{Stream, StreamExt};
use market_core::ClassId;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

async fn next_json<S>(stream: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("websocket message before timeout")
            .expect("stream open")
            .expect("valid frame");
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("json payload");
        }
    }
}

#[tokio::test]
async fn websocket_streams_session_events_for_the_requested_session() {
    let state = AppState::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (mut socket, _) = connect_async(format!("ws://{addr}/ws/events?session_id=2"))
        .await
        .unwrap();

    let connected = next_json(&mut socket).await;
    assert_eq!(connected["event_type"], "connected");
    assert_eq!(connected["session_id"], 2);

    state.create_session(ClassId::NineA).unwrap();
    let (second, _) = state.create_session(ClassId::NineB).unwrap();
    assert_eq!(second, 2);
    state.invest(second, 0, 250.0).unwrap();

    let started = next_json(&mut socket).await;
    assert_eq!(started["event_type"], "session_started");
    assert_eq!(started["class_id"], "9B");

    let applied = next_json(&mut socket).await;
    assert_eq!(applied["event_type"], "session");
    assert_eq!(applied["event"]["event_type"], "investment_applied");
    assert_eq!(applied["event"]["company"], "EOLION");
}

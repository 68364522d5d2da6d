mod support;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

// Reads messages until `want` matches one, or fails after a timeout.
async fn next_matching(socket: &mut Socket, want: impl Fn(&Value) -> bool) -> Value {
    tokio::time::timeout(Duration::from_secs(3), async {
        while let Some(msg) = socket.next().await {
            let msg = msg.expect("websocket message");
            let Ok(text) = msg.to_text() else { continue };
            if text.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(text).expect("server message json");
            if want(&value) {
                return value;
            }
        }
        panic!("socket closed before expected message");
    })
    .await
    .expect("expected message in time")
}

#[tokio::test]
async fn test_viewer_streams_frames_and_controls_helm() {
    let base_url = support::ensure_server();
    let (mut socket, _) = connect_async(support::ws_url())
        .await
        .expect("websocket connect");

    let speed = next_matching(&mut socket, |v| {
        v["type"] == "Frame" && v["data"]["kind"] == "speed"
    })
    .await;
    assert_eq!(speed["data"]["text"].as_str().map(str::len), Some(6));

    socket
        .send(Message::Text(
            r#"{"type":"Control","data":{"action":"rudder-right"}}"#.into(),
        ))
        .await
        .expect("send control");

    let rudder = next_matching(&mut socket, |v| {
        v["data"]["gauge"] == "rudder" && v["data"]["value"] == 37
    })
    .await;
    assert_eq!(rudder["data"]["max"], 70);

    let state: Value = reqwest::get(format!("{base_url}/state"))
        .await
        .expect("state request")
        .json()
        .await
        .expect("state json");
    assert_eq!(state["rudder_angle"], 37.5);
    assert_eq!(state["rudder_deflection"], 2.5);

    // Quit stops the whole simulation; viewers see it wind down.
    socket
        .send(Message::Text(r#"{"type":"Quit"}"#.into()))
        .await
        .expect("send quit");
    next_matching(&mut socket, |v| v["type"] == "Phase" && v["data"] == "stopped").await;
}

use crate::interface_adapters::protocol::{ClientMessage, PhaseDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::use_cases::LifecyclePhase;

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, watch};
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    FramesClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

// Process-unique id for correlating viewer logs.
fn next_conn_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let span = info_span!("viewer", conn_id = next_conn_id());
    ws.on_upgrade(move |socket| handle_socket(socket, state).instrument(span))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before sending anything so no frame falls between panel and stream.
    let mut frame_rx = state.frame_bytes_tx.subscribe();
    let mut phase_rx = state.lifecycle.subscribe();

    let panel = state.panel_latest_rx.borrow().clone();
    if !panel.as_str().is_empty() && socket.send(Message::Text(panel)).await.is_err() {
        info!("viewer disconnected before first panel");
        return;
    }

    info!("viewer connected");
    let mut msgs_out: u64 = 0;
    match run_viewer_loop(&mut socket, &state, &mut frame_rx, &mut phase_rx, &mut msgs_out).await
    {
        Ok(()) => {}
        Err(e) => warn!(error = ?e, "viewer loop exited with error"),
    }

    // Close handshake; the peer may already be gone.
    let _ = socket.close().await;
    info!(msgs_out, "viewer disconnected");
}

async fn run_viewer_loop(
    socket: &mut WebSocket,
    state: &AppState,
    frame_rx: &mut broadcast::Receiver<Utf8Bytes>,
    phase_rx: &mut watch::Receiver<LifecyclePhase>,
    msgs_out: &mut u64,
) -> Result<(), NetError> {
    if *phase_rx.borrow_and_update() == LifecyclePhase::Stopped {
        send_phase(socket, LifecyclePhase::Stopped).await?;
        return Ok(());
    }

    loop {
        tokio::select! {
            received = frame_rx.recv() => match received {
                Ok(bytes) => {
                    socket.send(Message::Text(bytes)).await?;
                    *msgs_out += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!(missed = n, "viewer lagged; skipping to latest frame");
                }
                Err(broadcast::error::RecvError::Closed) => return Err(NetError::FramesClosed),
            },
            changed = phase_rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let phase = *phase_rx.borrow_and_update();
                send_phase(socket, phase).await?;
                if phase == LifecyclePhase::Stopped {
                    return Ok(());
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(txt))) => handle_client_message(state, txt.as_str()),
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(NetError::Ws(e)),
            },
        }
    }
}

async fn send_phase(socket: &mut WebSocket, phase: LifecyclePhase) -> Result<(), NetError> {
    let msg = ServerMessage::Phase(PhaseDto::from(phase));
    let txt = serde_json::to_string(&msg).map_err(NetError::Serialization)?;
    socket.send(Message::Text(txt.into())).await?;
    Ok(())
}

fn handle_client_message(state: &AppState, txt: &str) {
    match serde_json::from_str::<ClientMessage>(txt) {
        Ok(ClientMessage::Control { action }) => {
            if let Err(e) = state.helm.apply(action.into()) {
                warn!(?action, error = %e, "control rejected");
            }
        }
        Ok(ClientMessage::Quit) => {
            info!("quit requested by viewer");
            state.lifecycle.request_shutdown();
        }
        Err(e) => {
            warn!(error = %e, "ignoring invalid client message");
        }
    }
}

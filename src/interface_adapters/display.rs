// Display surface adapter: fans frames out to connected viewers.

use crate::domain::{DisplayError, DisplayFrame, DisplaySink, Gauge};
use crate::interface_adapters::protocol::{FrameDto, PanelDto, ServerMessage};
use crate::use_cases::LifecyclePhase;
use crate::use_cases::lifecycle::wait_stopped;
use axum::extract::ws::Utf8Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// `DisplaySink` backed by a broadcast channel.
///
/// Having no viewers is fine; writing after `release` is an error.
#[derive(Debug)]
pub struct BroadcastSink {
    frame_tx: broadcast::Sender<DisplayFrame>,
    released: AtomicBool,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (frame_tx, _frame_rx) = broadcast::channel(capacity);
        Self {
            frame_tx,
            released: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayFrame> {
        self.frame_tx.subscribe()
    }

    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            info!("display surface released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl DisplaySink for BroadcastSink {
    fn show(&self, frame: DisplayFrame) -> Result<(), DisplayError> {
        if self.is_released() {
            return Err(DisplayError::Released);
        }
        // Err only means nobody is watching right now.
        let _ = self.frame_tx.send(frame);
        Ok(())
    }
}

/// Most recent frame per instrument.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub speed: Option<DisplayFrame>,
    pub throttle_setting: Option<DisplayFrame>,
    pub throttle_actual: Option<DisplayFrame>,
    pub rudder: Option<DisplayFrame>,
    pub status: Option<DisplayFrame>,
}

impl Panel {
    pub fn apply(&mut self, frame: &DisplayFrame) {
        let slot = match frame {
            DisplayFrame::Speed { .. } => &mut self.speed,
            DisplayFrame::Gauge { gauge, .. } => match gauge {
                Gauge::ThrottleSetting => &mut self.throttle_setting,
                Gauge::ThrottleActual => &mut self.throttle_actual,
                Gauge::Rudder => &mut self.rudder,
            },
            DisplayFrame::Status { .. } => &mut self.status,
        };
        *slot = Some(frame.clone());
    }
}

pub fn panel_bytes(panel: &Panel) -> Option<Utf8Bytes> {
    let msg = ServerMessage::Panel(PanelDto::from(panel));
    match serde_json::to_string(&msg) {
        Ok(txt) => Some(Utf8Bytes::from(txt)),
        Err(e) => {
            error!(error = ?e, "failed to serialize panel");
            None
        }
    }
}

/// Serializes each frame once for all viewers and keeps the latest panel.
///
/// Runs until the lifecycle reaches `Stopped`.
pub async fn frame_serializer(
    mut frame_rx: broadcast::Receiver<DisplayFrame>,
    frame_bytes_tx: broadcast::Sender<Utf8Bytes>,
    panel_latest_tx: watch::Sender<Utf8Bytes>,
    phase_rx: watch::Receiver<LifecyclePhase>,
) {
    let mut panel = Panel::default();
    let stopped = wait_stopped(phase_rx);
    tokio::pin!(stopped);

    loop {
        let frame = tokio::select! {
            _ = &mut stopped => break,
            received = frame_rx.recv() => match received {
                Ok(frame) => frame,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "frame serializer lagged; skipping to latest frame");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("display channel closed; serializer exiting");
                    break;
                }
            },
        };

        panel.apply(&frame);
        if let Some(bytes) = panel_bytes(&panel) {
            panel_latest_tx.send_replace(bytes);
        }

        let msg = ServerMessage::Frame(FrameDto::from(&frame));
        match serde_json::to_string(&msg) {
            Ok(txt) => {
                let _ = frame_bytes_tx.send(Utf8Bytes::from(txt));
            }
            Err(e) => error!(error = ?e, "failed to serialize frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tone;
    use crate::use_cases::Lifecycle;
    use std::time::Duration;

    #[test]
    fn released_sink_rejects_frames() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();

        sink.show(DisplayFrame::speed(1.0)).expect("open sink");
        assert_eq!(rx.try_recv().ok(), Some(DisplayFrame::speed(1.0)));

        sink.release();
        assert_eq!(sink.show(DisplayFrame::speed(2.0)), Err(DisplayError::Released));
    }

    #[test]
    fn no_viewers_is_not_a_failure() {
        let sink = BroadcastSink::new(8);
        assert!(sink.show(DisplayFrame::status(3.0)).is_ok());
    }

    #[test]
    fn panel_keeps_latest_per_instrument() {
        let mut panel = Panel::default();
        panel.apply(&DisplayFrame::gauge(Gauge::Rudder, 30.0, 70, Tone::Nominal));
        panel.apply(&DisplayFrame::gauge(Gauge::Rudder, 32.5, 70, Tone::Nominal));
        panel.apply(&DisplayFrame::speed(12.0));

        assert_eq!(
            panel.rudder,
            Some(DisplayFrame::gauge(Gauge::Rudder, 32.5, 70, Tone::Nominal))
        );
        assert_eq!(panel.speed, Some(DisplayFrame::speed(12.0)));
        assert!(panel.status.is_none());
    }

    #[tokio::test]
    async fn serializer_publishes_frames_and_panel() {
        let sink = BroadcastSink::new(16);
        let (frame_bytes_tx, mut frame_bytes_rx) = broadcast::channel(16);
        let (panel_latest_tx, panel_latest_rx) = watch::channel(Utf8Bytes::from(""));
        let lifecycle = Lifecycle::new();

        let task = tokio::spawn(frame_serializer(
            sink.subscribe(),
            frame_bytes_tx,
            panel_latest_tx,
            lifecycle.subscribe(),
        ));

        sink.show(DisplayFrame::speed(7.3)).expect("open sink");
        let bytes = tokio::time::timeout(Duration::from_secs(1), frame_bytes_rx.recv())
            .await
            .expect("frame in time")
            .expect("frame channel open");
        let json: serde_json::Value = serde_json::from_str(bytes.as_str()).expect("json");
        assert_eq!(json["data"]["text"], "0007.3");

        let panel: serde_json::Value =
            serde_json::from_str(panel_latest_rx.borrow().as_str()).expect("panel json");
        assert_eq!(panel["type"], "Panel");
        assert_eq!(panel["data"]["speed"]["text"], "0007.3");

        task.abort();
    }
}

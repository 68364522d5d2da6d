use crate::domain::VehicleState;
use crate::use_cases::{Helm, Lifecycle};
use axum::extract::ws::Utf8Bytes;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

pub struct AppState {
    // Setpoint writer shared by every control source.
    pub helm: Arc<Helm>,
    // Read side of the simulation for state queries.
    pub vehicle: Arc<VehicleState>,
    // Shutdown trigger and phase updates.
    pub lifecycle: Lifecycle,
    // Serialized display frames, shared across all viewers.
    pub frame_bytes_tx: broadcast::Sender<Utf8Bytes>,
    // Latest serialized panel for newly connected viewers.
    pub panel_latest_rx: watch::Receiver<Utf8Bytes>,
}

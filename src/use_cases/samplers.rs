// Read-only loops that forward instrument readings to the display.

use super::lifecycle::{LoopOutcome, tagged};
use super::ticker::run_periodic;
use super::types::{LifecyclePhase, LoopKind, SimSettings};
use crate::domain::{
    DisplayError, DisplayFrame, DisplaySink, Gauge, InstrumentTuning, Tone, VehicleState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

pub fn throttle_setting_frame(vehicle: &VehicleState, cfg: &InstrumentTuning) -> DisplayFrame {
    DisplayFrame::gauge(
        Gauge::ThrottleSetting,
        vehicle.rpm_setting(),
        cfg.rpm_gauge_max,
        Tone::Nominal,
    )
}

pub fn throttle_actual_frame(vehicle: &VehicleState, cfg: &InstrumentTuning) -> DisplayFrame {
    let reading = vehicle.rpm_actual().clamp(0.0, cfg.rpm_gauge_max as f64);
    let tone = if reading < cfg.rpm_critical {
        Tone::Nominal
    } else {
        Tone::Critical
    };
    DisplayFrame::gauge(Gauge::ThrottleActual, reading, cfg.rpm_gauge_max, tone)
}

pub fn rudder_frame(vehicle: &VehicleState, cfg: &InstrumentTuning) -> DisplayFrame {
    DisplayFrame::gauge(
        Gauge::Rudder,
        vehicle.rudder_angle(),
        cfg.rudder_gauge_max,
        Tone::Nominal,
    )
}

pub fn status_frame(vehicle: &VehicleState, _cfg: &InstrumentTuning) -> DisplayFrame {
    DisplayFrame::status(vehicle.velocity())
}

pub type FrameFn = fn(&VehicleState, &InstrumentTuning) -> DisplayFrame;

pub async fn sampler_loop(
    kind: LoopKind,
    period: Duration,
    vehicle: Arc<VehicleState>,
    sink: Arc<dyn DisplaySink>,
    cfg: InstrumentTuning,
    frame: FrameFn,
    phase_rx: watch::Receiver<LifecyclePhase>,
) -> Result<(), DisplayError> {
    run_periodic(kind, period, phase_rx, move || {
        sink.show(frame(&vehicle, &cfg))
    })
    .await
}

pub(crate) fn spawn_samplers(
    tasks: &mut JoinSet<LoopOutcome>,
    vehicle: Arc<VehicleState>,
    sink: Arc<dyn DisplaySink>,
    settings: SimSettings,
    cfg: InstrumentTuning,
    phase_rx: watch::Receiver<LifecyclePhase>,
) {
    let samplers: [(LoopKind, Duration, FrameFn); 4] = [
        (
            LoopKind::ThrottleSetting,
            settings.throttle_setting_interval,
            throttle_setting_frame,
        ),
        (
            LoopKind::ThrottleActual,
            settings.throttle_actual_interval,
            throttle_actual_frame,
        ),
        (LoopKind::Rudder, settings.rudder_interval, rudder_frame),
        (LoopKind::Status, settings.status_interval, status_frame),
    ];

    for (kind, period, frame) in samplers {
        tasks.spawn(tagged(
            kind,
            sampler_loop(
                kind,
                period,
                vehicle.clone(),
                sink.clone(),
                cfg,
                frame,
                phase_rx.clone(),
            ),
        ));
    }
}

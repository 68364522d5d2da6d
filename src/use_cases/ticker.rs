use super::lifecycle::wait_cancelled;
use super::types::{LifecyclePhase, LoopKind};
use crate::domain::DisplayError;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Runs `step` once per `period` until the lifecycle leaves `Running`.
///
/// The first step runs one full period after start, and ticks missed under load are
/// dropped rather than replayed. Cancellation is checked before each tick, so no
/// step starts once it is observed.
/// The first step error ends the loop and is returned.
pub async fn run_periodic<F>(
    kind: LoopKind,
    period: Duration,
    mut phase_rx: watch::Receiver<LifecyclePhase>,
    mut step: F,
) -> Result<(), DisplayError>
where
    F: FnMut() -> Result<(), DisplayError>,
{
    debug!(%kind, period_ms = period.as_millis() as u64, "loop started");
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            biased;
            _ = wait_cancelled(&mut phase_rx) => break Ok(()),
            _ = interval.tick() => {
                if let Err(e) = step() {
                    break Err(e);
                }
            }
        }
    };

    debug!(%kind, ok = result.is_ok(), "loop stopped");
    result
}

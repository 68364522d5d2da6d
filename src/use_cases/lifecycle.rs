// Lifecycle controller: starts every loop against one cancellation signal and
// joins them all on shutdown.

use super::physics::physics_loop;
use super::samplers::spawn_samplers;
use super::types::{LifecyclePhase, LoopKind, SimError, SimSettings};
use crate::domain::{DisplayError, DisplayFrame, DisplaySink, SimTuning, VehicleState};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};

pub(crate) type LoopOutcome = (LoopKind, Result<(), DisplayError>);

/// Shared cancellation signal, published as a `LifecyclePhase`.
///
/// `Running -> Cancelling -> Stopped`; each transition happens at most once.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase_tx: Arc<watch::Sender<LifecyclePhase>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (phase_tx, _phase_rx) = watch::channel(LifecyclePhase::Running);
        Self {
            phase_tx: Arc::new(phase_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecyclePhase> {
        self.phase_tx.subscribe()
    }

    pub fn phase(&self) -> LifecyclePhase {
        *self.phase_tx.borrow()
    }

    /// Moves `Running` to `Cancelling`. Returns false if shutdown was already underway.
    pub fn request_shutdown(&self) -> bool {
        let requested = self.phase_tx.send_if_modified(|phase| {
            if *phase == LifecyclePhase::Running {
                *phase = LifecyclePhase::Cancelling;
                true
            } else {
                false
            }
        });
        if requested {
            info!("shutdown requested");
        }
        requested
    }

    fn mark_stopped(&self) {
        self.phase_tx.send_replace(LifecyclePhase::Stopped);
    }
}

/// Resolves once the phase leaves `Running` (or the lifecycle is gone).
pub async fn wait_cancelled(phase_rx: &mut watch::Receiver<LifecyclePhase>) {
    let _ = phase_rx
        .wait_for(|phase| *phase != LifecyclePhase::Running)
        .await;
}

/// Resolves once every loop has returned.
pub async fn wait_stopped(mut phase_rx: watch::Receiver<LifecyclePhase>) {
    let _ = phase_rx
        .wait_for(|phase| *phase == LifecyclePhase::Stopped)
        .await;
}

/// Running set of simulation loops.
pub struct Simulation {
    lifecycle: Lifecycle,
    tasks: JoinSet<LoopOutcome>,
}

impl Simulation {
    /// Paints the initial speed readout, then spawns the physics loop and every sampler.
    pub fn start(
        vehicle: Arc<VehicleState>,
        sink: Arc<dyn DisplaySink>,
        settings: SimSettings,
        tuning: SimTuning,
        lifecycle: Lifecycle,
    ) -> Result<Self, SimError> {
        sink.show(DisplayFrame::speed(vehicle.velocity()))
            .map_err(SimError::Paint)?;

        let mut tasks = JoinSet::new();
        let phase_rx = lifecycle.subscribe();

        tasks.spawn(tagged(
            LoopKind::Physics,
            physics_loop(
                vehicle.clone(),
                sink.clone(),
                settings.physics_interval,
                tuning.propulsion,
                phase_rx.clone(),
            ),
        ));
        spawn_samplers(
            &mut tasks,
            vehicle,
            sink,
            settings,
            tuning.instruments,
            phase_rx,
        );

        info!(loops = tasks.len(), "simulation started");
        Ok(Self { lifecycle, tasks })
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Joins every loop. The first failure cancels the rest and is returned
    /// once they have all stopped.
    pub async fn wait(mut self) -> Result<(), SimError> {
        let mut first_error = None;

        while let Some(joined) = self.tasks.join_next().await {
            let failure = match joined {
                Ok((_, Ok(()))) => None,
                Ok((kind, Err(source))) => {
                    error!(%kind, error = %source, "loop failed");
                    Some(SimError::Loop { kind, source })
                }
                Err(e) => {
                    error!(error = %e, "loop task aborted");
                    Some(SimError::Task(e))
                }
            };

            if let Some(err) = failure {
                self.lifecycle.request_shutdown();
                first_error.get_or_insert(err);
            }
        }

        self.lifecycle.mark_stopped();
        info!(failed = first_error.is_some(), "simulation stopped");
        first_error.map_or(Ok(()), Err)
    }
}

pub(crate) async fn tagged<F>(kind: LoopKind, run: F) -> LoopOutcome
where
    F: Future<Output = Result<(), DisplayError>>,
{
    (kind, run.await)
}

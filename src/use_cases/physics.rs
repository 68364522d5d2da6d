// The single writer of rpm, acceleration and velocity.

use super::ticker::run_periodic;
use super::types::{LifecyclePhase, LoopKind};
use crate::domain::systems::propulsion::tick_propulsion;
use crate::domain::{
    DisplayError, DisplayFrame, DisplaySink, PropulsionState, PropulsionTuning, VehicleState,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Advances the vehicle by one physics tick and returns the stored result.
pub fn advance<R: Rng + ?Sized>(
    vehicle: &VehicleState,
    rng: &mut R,
    cfg: &PropulsionTuning,
) -> PropulsionState {
    let mut p = vehicle.propulsion();
    // Setpoint is read without coordination; a concurrent press lands next tick.
    tick_propulsion(&mut p, vehicle.rpm_setting(), rng, cfg);
    vehicle.store_propulsion(p);
    p
}

pub async fn physics_loop(
    vehicle: Arc<VehicleState>,
    sink: Arc<dyn DisplaySink>,
    period: Duration,
    cfg: PropulsionTuning,
    phase_rx: watch::Receiver<LifecyclePhase>,
) -> Result<(), DisplayError> {
    let mut rng = StdRng::from_entropy();
    run_periodic(LoopKind::Physics, period, phase_rx, move || {
        let p = advance(&vehicle, &mut rng, &cfg);
        sink.show(DisplayFrame::speed(p.velocity))
    })
    .await
}

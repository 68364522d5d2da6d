// Helm controls: clamped setpoint changes plus an immediate display refresh.

use super::lifecycle::Lifecycle;
use super::samplers::rudder_frame;
use super::types::{ControlAction, ControlError, LifecyclePhase};
use crate::domain::systems::helm::{
    lower_throttle, raise_throttle, rudder_to_port, rudder_to_starboard,
};
use crate::domain::{
    DisplayFrame, DisplaySink, HelmTuning, InstrumentTuning, SimTuning,
    VehicleState,
};
use std::sync::Arc;
use tracing::{debug, error};

/// The only writer of the throttle and rudder setpoints.
pub struct Helm {
    vehicle: Arc<VehicleState>,
    sink: Arc<dyn DisplaySink>,
    lifecycle: Lifecycle,
    tuning: HelmTuning,
    instruments: InstrumentTuning,
}

impl Helm {
    pub fn new(
        vehicle: Arc<VehicleState>,
        sink: Arc<dyn DisplaySink>,
        lifecycle: Lifecycle,
        tuning: SimTuning,
    ) -> Self {
        Self {
            vehicle,
            sink,
            lifecycle,
            tuning: tuning.helm,
            instruments: tuning.instruments,
        }
    }

    pub fn increase_throttle(&self) -> Result<(), ControlError> {
        self.apply(ControlAction::IncreaseThrottle)
    }

    pub fn decrease_throttle(&self) -> Result<(), ControlError> {
        self.apply(ControlAction::DecreaseThrottle)
    }

    pub fn rudder_left(&self) -> Result<(), ControlError> {
        self.apply(ControlAction::RudderLeft)
    }

    pub fn rudder_right(&self) -> Result<(), ControlError> {
        self.apply(ControlAction::RudderRight)
    }

    /// Applies one control press.
    ///
    /// Presses are refused once the lifecycle leaves `Running`. A failed refresh is
    /// fatal: shutdown is requested before the error is returned.
    pub fn apply(&self, action: ControlAction) -> Result<(), ControlError> {
        let phase = self.lifecycle.phase();
        if phase != LifecyclePhase::Running {
            debug!(?action, ?phase, "control refused");
            return Err(ControlError::Closed(phase));
        }

        let cfg = &self.tuning;
        let frame = match action {
            ControlAction::IncreaseThrottle => {
                self.vehicle.update_rpm_setting(|s| raise_throttle(s, cfg));
                DisplayFrame::speed(self.vehicle.velocity())
            }
            ControlAction::DecreaseThrottle => {
                self.vehicle.update_rpm_setting(|s| lower_throttle(s, cfg));
                DisplayFrame::speed(self.vehicle.velocity())
            }
            ControlAction::RudderLeft => {
                self.vehicle.update_rudder_angle(|a| rudder_to_port(a, cfg));
                rudder_frame(&self.vehicle, &self.instruments)
            }
            ControlAction::RudderRight => {
                self.vehicle
                    .update_rudder_angle(|a| rudder_to_starboard(a, cfg));
                rudder_frame(&self.vehicle, &self.instruments)
            }
        };

        debug!(
            ?action,
            rpm_setting = self.vehicle.rpm_setting(),
            rudder_angle = self.vehicle.rudder_angle(),
            "control applied"
        );

        self.sink.show(frame).map_err(|e| {
            error!(?action, error = %e, "display refresh failed");
            self.lifecycle.request_shutdown();
            ControlError::Refresh(e)
        })
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }
}

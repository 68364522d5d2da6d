// Use-case level inputs/outputs for the simulation.

use crate::domain::DisplayError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// One helm control press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    IncreaseThrottle,
    DecreaseThrottle,
    RudderLeft,
    RudderRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Running,
    Cancelling,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    Physics,
    ThrottleSetting,
    ThrottleActual,
    Rudder,
    Status,
}

impl LoopKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::ThrottleSetting => "throttle_setting",
            Self::ThrottleActual => "throttle_actual",
            Self::Rudder => "rudder",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed tick interval of every loop.
#[derive(Debug, Clone, Copy)]
pub struct SimSettings {
    pub physics_interval: Duration,
    pub throttle_setting_interval: Duration,
    pub throttle_actual_interval: Duration,
    pub rudder_interval: Duration,
    pub status_interval: Duration,
}

/// Why a control press was not applied, or not displayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("controls are closed while the simulation is {0:?}")]
    Closed(LifecyclePhase),

    #[error("display refresh failed: {0}")]
    Refresh(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("initial display paint failed: {0}")]
    Paint(#[source] DisplayError),

    #[error("{kind} loop failed: {source}")]
    Loop {
        kind: LoopKind,
        #[source]
        source: DisplayError,
    },

    #[error("loop task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

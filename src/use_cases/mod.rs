// Use cases layer: the simulation loops, helm controls and their lifecycle.

pub mod helm;
pub mod lifecycle;
pub mod physics;
pub mod samplers;
pub mod ticker;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use helm::Helm;
pub use lifecycle::{Lifecycle, Simulation};
pub use types::{ControlAction, ControlError, LifecyclePhase, LoopKind, SimError, SimSettings};

// Domain layer: vehicle state, update laws and the display port.

pub mod display;
pub mod state;
pub mod status;
pub mod systems;
pub mod tuning;

pub use display::{DisplayError, DisplayFrame, DisplaySink, Gauge, Tone};
pub use state::{AtomicF64, Point3, VehicleSnapshot, VehicleState};
pub use status::VelocityBand;
pub use systems::propulsion::PropulsionState;
pub use tuning::{HelmTuning, InstrumentTuning, PropulsionTuning, SimTuning};

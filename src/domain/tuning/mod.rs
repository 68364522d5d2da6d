// Simulation tuning. Keep separate from runtime configuration (ports, channel sizes).

pub mod helm;
pub mod instruments;
pub mod propulsion;

pub use helm::HelmTuning;
pub use instruments::InstrumentTuning;
pub use propulsion::PropulsionTuning;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimTuning {
    pub propulsion: PropulsionTuning,
    pub helm: HelmTuning,
    pub instruments: InstrumentTuning,
}

/// Gauge scales used by the sampler loops.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentTuning {
    /// Full scale of both turbine rpm gauges.
    pub rpm_gauge_max: u32,

    /// Actual rpm at or above this reads as critical.
    pub rpm_critical: f64,

    /// Full scale of the rudder gauge.
    pub rudder_gauge_max: u32,
}

impl Default for InstrumentTuning {
    fn default() -> Self {
        Self {
            rpm_gauge_max: 200,
            rpm_critical: 140.0,
            rudder_gauge_max: 70,
        }
    }
}

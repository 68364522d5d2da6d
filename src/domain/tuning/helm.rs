/// Step sizes and bounds for the helm controls.
#[derive(Debug, Clone, Copy)]
pub struct HelmTuning {
    /// Turbine rpm added or removed per throttle press.
    pub throttle_step: f64,
    pub rpm_setting_min: f64,
    pub rpm_setting_max: f64,

    /// Degrees moved per rudder press.
    pub rudder_step: f64,
    pub rudder_min: f64,
    pub rudder_max: f64,
}

impl Default for HelmTuning {
    fn default() -> Self {
        Self {
            throttle_step: 10.0,
            rpm_setting_min: 0.0,
            rpm_setting_max: 200.0,
            rudder_step: 2.5,
            rudder_min: 0.0,
            rudder_max: 70.0,
        }
    }
}

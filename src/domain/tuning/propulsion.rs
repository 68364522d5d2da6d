/// Constants of the turbine/velocity update law.
#[derive(Debug, Clone, Copy)]
pub struct PropulsionTuning {
    /// Divisor scale of the rpm lag step: `(rpm + 1) * lag_gain`.
    pub lag_gain: f64,

    /// Passive per-tick rpm decay factor.
    pub rpm_decay: f64,

    /// Upper bound (exclusive) of the multiplicative rpm jitter.
    pub rpm_jitter: f64,

    /// Actual rpm per unit of acceleration.
    pub rpm_per_acceleration: f64,

    /// Euler step divisor applied to acceleration each tick.
    pub integration_divisor: f64,

    /// Drag factor is drawn uniformly from `drag_min..drag_max` every tick.
    pub drag_min: f64,
    pub drag_max: f64,
}

impl Default for PropulsionTuning {
    fn default() -> Self {
        Self {
            lag_gain: 5.0,
            rpm_decay: 0.998,
            rpm_jitter: 0.004,
            rpm_per_acceleration: 10.0,
            integration_divisor: 10.0,
            drag_min: 0.99,
            drag_max: 0.993,
        }
    }
}

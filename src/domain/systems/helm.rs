// Clamped setpoint increments for the helm controls.

use crate::domain::tuning::HelmTuning;

pub fn raise_throttle(setting: f64, cfg: &HelmTuning) -> f64 {
    (setting + cfg.throttle_step).min(cfg.rpm_setting_max)
}

pub fn lower_throttle(setting: f64, cfg: &HelmTuning) -> f64 {
    (setting - cfg.throttle_step).max(cfg.rpm_setting_min)
}

pub fn rudder_to_port(angle: f64, cfg: &HelmTuning) -> f64 {
    (angle - cfg.rudder_step).clamp(cfg.rudder_min, cfg.rudder_max)
}

pub fn rudder_to_starboard(angle: f64, cfg: &HelmTuning) -> f64 {
    (angle + cfg.rudder_step).clamp(cfg.rudder_min, cfg.rudder_max)
}

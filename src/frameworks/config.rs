use crate::use_cases::SimSettings;
use std::{env, time::Duration};

// Runtime constants (not simulation tuning).

pub fn http_port() -> u16 {
    env::var("HELM_HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

/// Stdin controls are on unless `HELM_CONSOLE` is `0`, `false` or `off`.
pub fn console_enabled() -> bool {
    match env::var("HELM_CONSOLE") {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"),
        Err(_) => true,
    }
}

pub const FRAME_BROADCAST_CAPACITY: usize = 256;

pub const PHYSICS_INTERVAL: Duration = Duration::from_millis(16);
pub const THROTTLE_SETTING_INTERVAL: Duration = Duration::from_millis(250);
pub const THROTTLE_ACTUAL_INTERVAL: Duration = Duration::from_millis(100);
pub const RUDDER_INTERVAL: Duration = Duration::from_millis(16);
pub const STATUS_INTERVAL: Duration = Duration::from_millis(1000);

pub fn sim_settings() -> SimSettings {
    SimSettings {
        physics_interval: PHYSICS_INTERVAL,
        throttle_setting_interval: THROTTLE_SETTING_INTERVAL,
        throttle_actual_interval: THROTTLE_ACTUAL_INTERVAL,
        rudder_interval: RUDDER_INTERVAL,
        status_interval: STATUS_INTERVAL,
    }
}

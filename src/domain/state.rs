// Shared vehicle state. Every scalar is its own atomic so independently paced
// loops never contend on a lock; there is no joint snapshot guarantee.

use super::systems::propulsion::PropulsionState;
use std::sync::atomic::{AtomicU64, Ordering};

/// Rudder angle the vehicle starts with (centre of the 0..=70 scale).
pub const NEUTRAL_RUDDER_ANGLE: f64 = 35.0;
/// Buoyancy the vehicle starts with (middle of 0..=100).
pub const INITIAL_BUOYANCY: f64 = 50.0;

/// An `f64` stored as raw bits in an `AtomicU64`.
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Applies `f` atomically and returns the stored result.
    ///
    /// Retries on contention, so concurrent updates are never lost.
    pub fn update(&self, mut f: impl FnMut(f64) -> f64) -> f64 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = f(f64::from_bits(current));
            match self.0.compare_exchange_weak(
                current,
                next.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Physical state of the vehicle, shared by every loop and the helm.
///
/// Setpoints (`turbine_rpm_setting`, `rudder_angle`) are written only by the
/// helm; `turbine_rpm_actual`, `acceleration` and `velocity` only by the
/// physics loop. The remaining fields are carried but not yet driven.
#[derive(Debug)]
pub struct VehicleState {
    position: [AtomicF64; 3],
    turbine_rpm_setting: AtomicF64,
    turbine_rpm_actual: AtomicF64,
    velocity: AtomicF64,
    acceleration: AtomicF64,
    rudder_angle: AtomicF64,
    heading: AtomicF64,
    heading_acceleration: AtomicF64,
    buoyancy: AtomicF64,
    buoyancy_acceleration: AtomicF64,
}

/// Field-by-field copy of the state; fields may come from different ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    pub position: Point3,
    pub turbine_rpm_setting: f64,
    pub turbine_rpm_actual: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub rudder_angle: f64,
    pub heading: f64,
    pub heading_acceleration: f64,
    pub buoyancy: f64,
    pub buoyancy_acceleration: f64,
}

impl VehicleSnapshot {
    /// Signed rudder deflection around the neutral angle (negative is port).
    pub fn rudder_deflection(&self) -> f64 {
        self.rudder_angle - NEUTRAL_RUDDER_ANGLE
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleState {
    pub fn new() -> Self {
        Self {
            position: Default::default(),
            turbine_rpm_setting: AtomicF64::new(0.0),
            turbine_rpm_actual: AtomicF64::new(0.0),
            velocity: AtomicF64::new(0.0),
            acceleration: AtomicF64::new(0.0),
            rudder_angle: AtomicF64::new(NEUTRAL_RUDDER_ANGLE),
            heading: AtomicF64::new(0.0),
            heading_acceleration: AtomicF64::new(0.0),
            buoyancy: AtomicF64::new(INITIAL_BUOYANCY),
            buoyancy_acceleration: AtomicF64::new(0.0),
        }
    }

    pub fn rpm_setting(&self) -> f64 {
        self.turbine_rpm_setting.load()
    }

    pub fn rpm_actual(&self) -> f64 {
        self.turbine_rpm_actual.load()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity.load()
    }

    pub fn rudder_angle(&self) -> f64 {
        self.rudder_angle.load()
    }

    pub fn position(&self) -> Point3 {
        let [x, y, z] = &self.position;
        Point3 {
            x: x.load(),
            y: y.load(),
            z: z.load(),
        }
    }

    /// Fields owned by the physics loop.
    pub fn propulsion(&self) -> PropulsionState {
        PropulsionState {
            rpm_actual: self.turbine_rpm_actual.load(),
            acceleration: self.acceleration.load(),
            velocity: self.velocity.load(),
        }
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            position: self.position(),
            turbine_rpm_setting: self.turbine_rpm_setting.load(),
            turbine_rpm_actual: self.turbine_rpm_actual.load(),
            velocity: self.velocity.load(),
            acceleration: self.acceleration.load(),
            rudder_angle: self.rudder_angle.load(),
            heading: self.heading.load(),
            heading_acceleration: self.heading_acceleration.load(),
            buoyancy: self.buoyancy.load(),
            buoyancy_acceleration: self.buoyancy_acceleration.load(),
        }
    }

    // Helm-only writers.

    pub(crate) fn update_rpm_setting(&self, f: impl FnMut(f64) -> f64) -> f64 {
        self.turbine_rpm_setting.update(f)
    }

    pub(crate) fn update_rudder_angle(&self, f: impl FnMut(f64) -> f64) -> f64 {
        self.rudder_angle.update(f)
    }

    // Physics-loop-only writer.
    pub(crate) fn store_propulsion(&self, p: PropulsionState) {
        self.turbine_rpm_actual.store(p.rpm_actual);
        self.acceleration.store(p.acceleration);
        self.velocity.store(p.velocity);
    }
}

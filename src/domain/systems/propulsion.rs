use crate::domain::tuning::PropulsionTuning;
use rand::Rng;

/// Fields advanced by the physics loop each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropulsionState {
    pub rpm_actual: f64,
    pub acceleration: f64,
    pub velocity: f64,
}

/// First-order lag of `actual` toward `setting`.
///
/// The `+ 1` keeps the divisor positive at zero rpm; the pull weakens as rpm rises.
pub fn lag_toward(actual: f64, setting: f64, gain: f64) -> f64 {
    actual + (setting - actual) / ((actual + 1.0) * gain)
}

/// Advances one physics tick. Steps run in a fixed order every tick.
pub fn tick_propulsion<R: Rng + ?Sized>(
    p: &mut PropulsionState,
    rpm_setting: f64,
    rng: &mut R,
    cfg: &PropulsionTuning,
) {
    // turbine rpm: lag, decay, jitter
    let mut rpm = lag_toward(p.rpm_actual, rpm_setting, cfg.lag_gain);
    rpm *= cfg.rpm_decay;
    rpm += rpm * unit(rng) * cfg.rpm_jitter;
    p.rpm_actual = rpm;

    // acceleration follows rpm directly (no inertia)
    p.acceleration = rpm / cfg.rpm_per_acceleration;

    // velocity: explicit Euler, then drag
    p.velocity += p.acceleration / cfg.integration_divisor;
    p.velocity *= cfg.drag_min + unit(rng) * (cfg.drag_max - cfg.drag_min);
}

// Uniform draw in [0, 1).
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::VelocityBand;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quiet() -> PropulsionTuning {
        PropulsionTuning {
            rpm_decay: 1.0,
            rpm_jitter: 0.0,
            drag_min: 1.0,
            drag_max: 1.0,
            ..PropulsionTuning::default()
        }
    }

    proptest! {
        #[test]
        fn lag_moves_strictly_toward_setting(
            actual in 0.0f64..1000.0,
            setting in 0.0f64..=200.0,
        ) {
            prop_assume!((setting - actual).abs() > 1e-6);
            let next = lag_toward(actual, setting, 5.0);
            if actual < setting {
                prop_assert!(next > actual && next <= setting);
            } else {
                prop_assert!(next < actual && next >= setting);
            }
        }

        #[test]
        fn rpm_stays_non_negative(
            actual in 0.0f64..400.0,
            setting in 0.0f64..=200.0,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut p = PropulsionState { rpm_actual: actual, ..Default::default() };
            tick_propulsion(&mut p, setting, &mut rng, &PropulsionTuning::default());
            prop_assert!(p.rpm_actual >= 0.0);
        }
    }

    #[test]
    fn lag_is_fixed_at_setting() {
        assert_eq!(lag_toward(80.0, 80.0, 5.0), 80.0);
        assert_eq!(lag_toward(0.0, 0.0, 5.0), 0.0);
    }

    #[test]
    fn first_tick_from_rest() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = PropulsionState::default();
        tick_propulsion(&mut p, 200.0, &mut rng, &quiet());

        // 0 + 200 / ((0 + 1) * 5)
        assert_eq!(p.rpm_actual, 40.0);
        assert_eq!(p.acceleration, 4.0);
        assert_eq!(p.velocity, 0.4);
    }

    #[test]
    fn jitter_and_drag_stay_in_range() {
        let cfg = PropulsionTuning::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let mut p = PropulsionState {
                rpm_actual: 100.0,
                acceleration: 0.0,
                velocity: 50.0,
            };
            tick_propulsion(&mut p, 100.0, &mut rng, &cfg);

            let decayed = 100.0 * cfg.rpm_decay;
            assert!(p.rpm_actual >= decayed);
            assert!(p.rpm_actual <= decayed * (1.0 + cfg.rpm_jitter));
            assert_eq!(p.acceleration, p.rpm_actual / 10.0);

            let integrated = 50.0 + p.acceleration / 10.0;
            assert!(p.velocity >= integrated * cfg.drag_min);
            assert!(p.velocity <= integrated * cfg.drag_max);
        }
    }

    #[test]
    fn full_throttle_converges_to_full_speed() {
        let cfg = PropulsionTuning::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut p = PropulsionState::default();

        for _ in 0..20_000 {
            tick_propulsion(&mut p, 200.0, &mut rng, &cfg);
        }

        let mut rpm_sum = 0.0;
        let samples = 5_000;
        for _ in 0..samples {
            tick_propulsion(&mut p, 200.0, &mut rng, &cfg);
            rpm_sum += p.rpm_actual;
            assert!(p.velocity >= 150.0, "velocity dropped to {}", p.velocity);
            assert_eq!(VelocityBand::classify(p.velocity), VelocityBand::FullSpeed);
        }
        let mean_rpm = rpm_sum / samples as f64;
        assert!((mean_rpm - 200.0).abs() < 10.0, "mean rpm {mean_rpm}");
    }

    #[test]
    fn idle_throttle_coasts_to_a_stop() {
        let cfg = PropulsionTuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = PropulsionState {
            rpm_actual: 150.0,
            acceleration: 15.0,
            velocity: 200.0,
        };
        for _ in 0..30_000 {
            tick_propulsion(&mut p, 0.0, &mut rng, &cfg);
        }
        assert!(p.rpm_actual < 1.0, "rpm {}", p.rpm_actual);
        assert_eq!(VelocityBand::classify(p.velocity), VelocityBand::Stopped);
    }
}

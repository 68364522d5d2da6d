// Port to the rendering surface. Loops and the helm push frames through it.

use crate::domain::status::VelocityBand;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("display surface already released")]
    Released,

    #[error("display backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gauge {
    ThrottleSetting,
    ThrottleActual,
    Rudder,
}

/// Presentation hint for a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Nominal,
    Critical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayFrame {
    /// Speed readout, already formatted.
    Speed { text: String },
    Gauge {
        gauge: Gauge,
        value: u32,
        max: u32,
        tone: Tone,
    },
    Status { band: VelocityBand, velocity: f64 },
}

impl DisplayFrame {
    /// Zero-padded, width 6, one decimal (`0042.5`).
    pub fn speed(velocity: f64) -> Self {
        Self::Speed {
            text: format!("{velocity:06.1}"),
        }
    }

    /// Gauge reading clamped to `0..=max` and truncated to whole units.
    pub fn gauge(gauge: Gauge, reading: f64, max: u32, tone: Tone) -> Self {
        Self::Gauge {
            gauge,
            value: reading.clamp(0.0, max as f64) as u32,
            max,
            tone,
        }
    }

    pub fn status(velocity: f64) -> Self {
        Self::Status {
            band: VelocityBand::classify(velocity),
            velocity,
        }
    }
}

pub trait DisplaySink: Send + Sync {
    fn show(&self, frame: DisplayFrame) -> Result<(), DisplayError>;
}

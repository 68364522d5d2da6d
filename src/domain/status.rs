/// Coarse classification of forward speed shown in the status log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityBand {
    Stopped,
    NearlyStopped,
    LowSpeed,
    Forward,
    HighSpeed,
    FullSpeed,
}

impl VelocityBand {
    /// Ordered first match; each threshold belongs to the band above it.
    pub fn classify(velocity: f64) -> Self {
        if velocity < 1.0 {
            Self::Stopped
        } else if velocity < 10.0 {
            Self::NearlyStopped
        } else if velocity < 50.0 {
            Self::LowSpeed
        } else if velocity < 100.0 {
            Self::Forward
        } else if velocity < 150.0 {
            Self::HighSpeed
        } else {
            Self::FullSpeed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::NearlyStopped => "Nearly stopped",
            Self::LowSpeed => "Moving forward at low speed",
            Self::Forward => "Moving forward",
            Self::HighSpeed => "Moving forward at high speed",
            Self::FullSpeed => "Full speed forward",
        }
    }
}

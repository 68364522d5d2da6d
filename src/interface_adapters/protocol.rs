// Wire protocol DTOs and conversions for viewers and control clients.

use crate::domain::{DisplayFrame, Gauge, Point3, Tone, VehicleSnapshot};
use crate::interface_adapters::display::Panel;
use crate::use_cases::{ControlAction, LifecyclePhase};
use serde::{Deserialize, Serialize};

/// Messages the server pushes to viewers over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Full instrument panel, sent once on connect.
    Panel(PanelDto),
    // One display update.
    Frame(FrameDto),
    // Lifecycle transitions (cancelling, stopped).
    Phase(PhaseDto),
}

/// Messages a viewer may send over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    Control { action: ControlActionDto },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlActionDto {
    IncreaseThrottle,
    DecreaseThrottle,
    RudderLeft,
    RudderRight,
}

impl ControlActionDto {
    /// Parses the `/controls/{action}` path segment.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "increase-throttle" => Some(Self::IncreaseThrottle),
            "decrease-throttle" => Some(Self::DecreaseThrottle),
            "rudder-left" => Some(Self::RudderLeft),
            "rudder-right" => Some(Self::RudderRight),
            _ => None,
        }
    }
}

impl From<ControlActionDto> for ControlAction {
    fn from(action: ControlActionDto) -> Self {
        match action {
            ControlActionDto::IncreaseThrottle => ControlAction::IncreaseThrottle,
            ControlActionDto::DecreaseThrottle => ControlAction::DecreaseThrottle,
            ControlActionDto::RudderLeft => ControlAction::RudderLeft,
            ControlActionDto::RudderRight => ControlAction::RudderRight,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeDto {
    ThrottleSetting,
    ThrottleActual,
    Rudder,
}

impl From<Gauge> for GaugeDto {
    fn from(gauge: Gauge) -> Self {
        match gauge {
            Gauge::ThrottleSetting => GaugeDto::ThrottleSetting,
            Gauge::ThrottleActual => GaugeDto::ThrottleActual,
            Gauge::Rudder => GaugeDto::Rudder,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneDto {
    Nominal,
    Critical,
}

impl From<Tone> for ToneDto {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Nominal => ToneDto::Nominal,
            Tone::Critical => ToneDto::Critical,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameDto {
    Speed {
        text: String,
    },
    Gauge {
        gauge: GaugeDto,
        value: u32,
        max: u32,
        tone: ToneDto,
    },
    Status {
        label: String,
        velocity: f64,
    },
}

impl From<&DisplayFrame> for FrameDto {
    fn from(frame: &DisplayFrame) -> Self {
        match frame {
            DisplayFrame::Speed { text } => FrameDto::Speed { text: text.clone() },
            DisplayFrame::Gauge {
                gauge,
                value,
                max,
                tone,
            } => FrameDto::Gauge {
                gauge: (*gauge).into(),
                value: *value,
                max: *max,
                tone: (*tone).into(),
            },
            DisplayFrame::Status { band, velocity } => FrameDto::Status {
                label: band.label().to_string(),
                velocity: *velocity,
            },
        }
    }
}

/// Latest reading of every instrument; missing until first reported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PanelDto {
    pub speed: Option<FrameDto>,
    pub throttle_setting: Option<FrameDto>,
    pub throttle_actual: Option<FrameDto>,
    pub rudder: Option<FrameDto>,
    pub status: Option<FrameDto>,
}

impl From<&Panel> for PanelDto {
    fn from(panel: &Panel) -> Self {
        Self {
            speed: panel.speed.as_ref().map(FrameDto::from),
            throttle_setting: panel.throttle_setting.as_ref().map(FrameDto::from),
            throttle_actual: panel.throttle_actual.as_ref().map(FrameDto::from),
            rudder: panel.rudder.as_ref().map(FrameDto::from),
            status: panel.status.as_ref().map(FrameDto::from),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDto {
    Running,
    Cancelling,
    Stopped,
}

impl From<LifecyclePhase> for PhaseDto {
    fn from(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Running => PhaseDto::Running,
            LifecyclePhase::Cancelling => PhaseDto::Cancelling,
            LifecyclePhase::Stopped => PhaseDto::Stopped,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Point3> for PointDto {
    fn from(p: Point3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// Full vehicle state for `GET /state`.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStateDto {
    pub phase: PhaseDto,
    pub position: PointDto,
    pub turbine_rpm_setting: f64,
    pub turbine_rpm_actual: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub rudder_angle: f64,
    pub rudder_deflection: f64,
    pub heading: f64,
    pub heading_acceleration: f64,
    pub buoyancy: f64,
    pub buoyancy_acceleration: f64,
    pub status: String,
}

impl VehicleStateDto {
    pub fn new(snapshot: VehicleSnapshot, phase: LifecyclePhase) -> Self {
        Self {
            phase: phase.into(),
            position: snapshot.position.into(),
            turbine_rpm_setting: snapshot.turbine_rpm_setting,
            turbine_rpm_actual: snapshot.turbine_rpm_actual,
            velocity: snapshot.velocity,
            acceleration: snapshot.acceleration,
            rudder_angle: snapshot.rudder_angle,
            rudder_deflection: snapshot.rudder_deflection(),
            heading: snapshot.heading,
            heading_acceleration: snapshot.heading_acceleration,
            buoyancy: snapshot.buoyancy,
            buoyancy_acceleration: snapshot.buoyancy_acceleration,
            status: crate::domain::VelocityBand::classify(snapshot.velocity)
                .label()
                .to_string(),
        }
    }
}

/// Lifecycle phase after a shutdown request.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResponse {
    pub phase: PhaseDto,
}

/// Setpoints after a control press.
#[derive(Debug, Clone, Serialize)]
pub struct ControlResponse {
    pub turbine_rpm_setting: f64,
    pub rudder_angle: f64,
}

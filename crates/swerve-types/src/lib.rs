use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One sweep of readings from a scanning distance sensor.
///
/// Distances are in meters, in sweep order. Readings are carried exactly as
/// the sensor delivered them: NaN, infinite, and negative sentinel values
/// commonly produced by real range sensors are **not** filtered here or
/// anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeScan {
    pub ranges: Vec<f32>,
}

impl RangeScan {
    /// Wrap a batch of raw distance readings.
    pub fn new(ranges: Vec<f32>) -> Self {
        Self { ranges }
    }

    /// `true` when the sweep delivered no readings at all.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Velocity command for a differential-drive base.
///
/// Constructed fresh on every policy tick and handed to the actuation
/// transport fire-and-forget; never retained or acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveCommand {
    /// Forward speed along the robot's X axis (m/s).
    pub linear_velocity: f32,
    /// Rotation rate around the vertical axis, counter-clockwise (rad/s).
    pub angular_velocity: f32,
}

impl DriveCommand {
    pub const fn new(linear_velocity: f32, angular_velocity: f32) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
        }
    }
}

/// Unified event wrapper for the internal bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g., "swerve-runtime::control_loop"
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    /// Build an event stamped with a fresh id and the current wall-clock time.
    pub fn now(source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Variants of data that can be routed over the internal event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    /// A raw sensor sweep, one batch per scan.
    Scan(RangeScan),
    /// A velocity command emitted by the motion policy.
    Drive(DriveCommand),
    /// A non-fatal fault raised by a component (e.g. an empty sweep).
    Fault { component: String, message: String },
}

/// Global error type spanning sensing faults and hardware failures.
#[derive(Error, Debug)]
pub enum SwerveError {
    /// A sweep arrived with zero readings; the minimum of an empty sequence
    /// is undefined, so the sweep is rejected instead of crashing the
    /// sampler.
    #[error("scan contained no range readings")]
    EmptyScan,

    #[error("hardware fault on {component}: {details}")]
    HardwareFault { component: String, details: String },
}

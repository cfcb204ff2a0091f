//! The fixed two-row motion policy.

use swerve_types::DriveCommand;

/// Forward cruise speed when the path is clear (m/s).
pub const DEFAULT_CRUISE_LINEAR_MPS: f32 = 0.5;

/// Rotation rate while avoiding an obstacle (rad/s).
pub const DEFAULT_AVOID_ANGULAR_RADPS: f32 = 0.5;

/// Maps the obstacle flag to one of two fixed velocity commands.
///
/// | obstacle | linear | angular |
/// |---|---|---|
/// | `false` | cruise | 0.0 |
/// | `true` | 0.0 | turn rate |
///
/// Pure and stateless: repeated calls with the same flag yield identical
/// commands.  There is no ramping, no distance-proportional response, and
/// the avoidance rotation is always in the same direction regardless of
/// which side the obstacle is on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPolicy {
    cruise_linear_mps: f32,
    avoid_angular_radps: f32,
}

impl MotionPolicy {
    /// Create a policy with explicit cruise and avoidance speeds.
    pub fn new(cruise_linear_mps: f32, avoid_angular_radps: f32) -> Self {
        Self {
            cruise_linear_mps,
            avoid_angular_radps,
        }
    }

    /// Decide the command for the current obstacle flag.
    pub fn decide(&self, obstacle: bool) -> DriveCommand {
        if obstacle {
            DriveCommand::new(0.0, self.avoid_angular_radps)
        } else {
            DriveCommand::new(self.cruise_linear_mps, 0.0)
        }
    }
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CRUISE_LINEAR_MPS, DEFAULT_AVOID_ANGULAR_RADPS)
    }
}

//! Generic `DriveActuator` trait for differential-drive bases.

use swerve_types::{DriveCommand, SwerveError};

/// A drive base that accepts velocity commands.
///
/// Commands are fire-and-forget: `apply` either hands the command to the
/// hardware or fails, and no acknowledgment ever flows back to the policy.
pub trait DriveActuator: Send {
    /// Stable identifier for this actuator, e.g. `"drive_base"`.
    fn id(&self) -> &str;

    /// Forward `command` to the drive hardware.
    ///
    /// # Errors
    ///
    /// Returns [`SwerveError::HardwareFault`] if the command cannot be
    /// applied (e.g. the controller is offline).
    fn apply(&mut self, command: &DriveCommand) -> Result<(), SwerveError>;
}

//! In-process simulation drivers for CI testing without physical hardware.
//!
//! [`SimLidar`] plays back a scripted sequence of sweep frames and
//! [`SimDrive`] records every command it is handed, so the full stack can
//! run in headless tests and the demo binary without a robot attached.
//!
//! # Example
//!
//! ```rust
//! use swerve_hal::sim::{SimDrive, SimLidar};
//! use swerve_hal::{DriveActuator, RangeSensor};
//! use swerve_types::DriveCommand;
//!
//! let mut lidar = SimLidar::new("sim_lidar", vec![vec![2.0, 1.5], vec![0.4]]);
//! assert_eq!(lidar.scan().unwrap().ranges, vec![2.0, 1.5]);
//!
//! let mut drive = SimDrive::new("drive_base");
//! drive.apply(&DriveCommand::new(0.5, 0.0)).unwrap();
//! assert_eq!(drive.history().len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use swerve_types::{DriveCommand, RangeScan, SwerveError};

use crate::actuator::DriveActuator;
use crate::sensor::RangeSensor;

// ────────────────────────────────────────────────────────────────────────────
// Scripted sensor
// ────────────────────────────────────────────────────────────────────────────

/// A simulated scanning sensor that plays back scripted sweep frames,
/// cycling back to the first frame after the last.
///
/// Frames may be empty; an empty frame is delivered as an empty
/// [`RangeScan`], which is how tests exercise the empty-sweep fault path
/// end to end.
pub struct SimLidar {
    id: String,
    frames: Vec<Vec<f32>>,
    cursor: usize,
}

impl SimLidar {
    /// Create a scripted sensor.  `frames` is one `Vec<f32>` per sweep.
    pub fn new(id: impl Into<String>, frames: Vec<Vec<f32>>) -> Self {
        Self {
            id: id.into(),
            frames,
            cursor: 0,
        }
    }
}

impl RangeSensor for SimLidar {
    fn id(&self) -> &str {
        &self.id
    }

    fn scan(&mut self) -> Result<RangeScan, SwerveError> {
        if self.frames.is_empty() {
            return Err(SwerveError::HardwareFault {
                component: self.id.clone(),
                details: "no scan frames scripted".to_string(),
            });
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(RangeScan::new(frame))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recording drive base
// ────────────────────────────────────────────────────────────────────────────

/// A simulated drive base that records every applied command.  Always
/// succeeds.
///
/// Clones share the same history, so a test can keep a clone for assertions
/// while the original is boxed away behind a drive adapter.
#[derive(Clone)]
pub struct SimDrive {
    id: String,
    history: Arc<Mutex<Vec<DriveCommand>>>,
}

impl SimDrive {
    /// Create a recording drive base with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every command applied so far, in order.
    pub fn history(&self) -> Vec<DriveCommand> {
        self.history.lock().expect("sim drive history poisoned").clone()
    }

    /// The most recently applied command, if any.
    pub fn last(&self) -> Option<DriveCommand> {
        self.history().last().copied()
    }
}

impl DriveActuator for SimDrive {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, command: &DriveCommand) -> Result<(), SwerveError> {
        self.history
            .lock()
            .expect("sim drive history poisoned")
            .push(*command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_lidar_cycles_through_frames() {
        let mut lidar = SimLidar::new("sim_lidar", vec![vec![2.0], vec![0.4]]);
        assert_eq!(lidar.scan().unwrap().ranges, vec![2.0]);
        assert_eq!(lidar.scan().unwrap().ranges, vec![0.4]);
        // Wraps back to the first frame.
        assert_eq!(lidar.scan().unwrap().ranges, vec![2.0]);
    }

    #[test]
    fn sim_lidar_delivers_empty_frames_as_empty_scans() {
        let mut lidar = SimLidar::new("sim_lidar", vec![vec![]]);
        assert!(lidar.scan().unwrap().is_empty());
    }

    #[test]
    fn sim_lidar_without_script_faults() {
        let mut lidar = SimLidar::new("sim_lidar", vec![]);
        let result = lidar.scan();
        assert!(matches!(
            result,
            Err(SwerveError::HardwareFault { component, .. }) if component == "sim_lidar"
        ));
    }

    #[test]
    fn sim_drive_records_commands_in_order() {
        let mut drive = SimDrive::new("drive_base");
        drive.apply(&DriveCommand::new(0.5, 0.0)).unwrap();
        drive.apply(&DriveCommand::new(0.0, 0.5)).unwrap();

        let history = drive.history();
        assert_eq!(history.len(), 2);
        assert!((history[0].linear_velocity - 0.5).abs() < f32::EPSILON);
        assert!((history[1].angular_velocity - 0.5).abs() < f32::EPSILON);
        assert_eq!(drive.last(), Some(DriveCommand::new(0.0, 0.5)));
    }

    #[test]
    fn sim_drive_clones_share_history() {
        let mut drive = SimDrive::new("drive_base");
        let view = drive.clone();
        drive.apply(&DriveCommand::new(0.5, 0.0)).unwrap();
        assert_eq!(view.history().len(), 1);
    }
}

//! `swerve-perception` – sweep reduction.
//!
//! Turns raw range sweeps into the single boolean the motion policy acts on.
//!
//! # Modules
//!
//! - [`detector`] – [`ObstacleDetector`][detector::ObstacleDetector]: reduces
//!   a sweep to its minimum distance and compares it against the safety
//!   threshold.
//! - [`flag`] – [`ObstacleFlag`][flag::ObstacleFlag]: the shared boolean cell
//!   written by the sampler and read by the policy ticker.

pub mod detector;
pub mod flag;

pub use detector::{DEFAULT_OBSTACLE_THRESHOLD_M, ObstacleDetector, ScanSummary};
pub use flag::ObstacleFlag;

//! `swerve-hal` – hardware seams.
//!
//! The rest of the stack only ever talks to the traits in this crate, so a
//! physical lidar driver or motor controller can be swapped in without
//! touching perception or policy logic.
//!
//! # Modules
//!
//! - [`sensor`] – [`RangeSensor`][sensor::RangeSensor]: pulls one
//!   [`RangeScan`][swerve_types::RangeScan] per sweep.
//! - [`actuator`] – [`DriveActuator`][actuator::DriveActuator]: accepts
//!   [`DriveCommand`][swerve_types::DriveCommand]s, fire-and-forget.
//! - [`sim`] – [`SimLidar`][sim::SimLidar] and [`SimDrive`][sim::SimDrive]:
//!   stub drivers for headless tests and the demo binary.

pub mod actuator;
pub mod sensor;
pub mod sim;

pub use actuator::DriveActuator;
pub use sensor::RangeSensor;
pub use sim::{SimDrive, SimLidar};

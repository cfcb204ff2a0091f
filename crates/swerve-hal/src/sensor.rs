//! Generic `RangeSensor` trait for scanning distance sensors.

use swerve_types::{RangeScan, SwerveError};

/// A scanning distance sensor that produces one [`RangeScan`] per sweep.
///
/// Drivers implement this trait and are bridged onto the event bus by a
/// sensor adapter; the rest of the stack never sees the driver directly.
pub trait RangeSensor: Send {
    /// Stable identifier for this sensor, e.g. `"front_lidar"`.
    fn id(&self) -> &str;

    /// Produce the next sweep.
    ///
    /// # Errors
    ///
    /// Returns [`SwerveError::HardwareFault`] when the sensor cannot deliver
    /// a sweep.
    fn scan(&mut self) -> Result<RangeScan, SwerveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-process sensor used only for tests.
    struct MockSensor {
        id: String,
        ranges: Vec<f32>,
    }

    impl RangeSensor for MockSensor {
        fn id(&self) -> &str {
            &self.id
        }

        fn scan(&mut self) -> Result<RangeScan, SwerveError> {
            Ok(RangeScan::new(self.ranges.clone()))
        }
    }

    #[test]
    fn mock_sensor_delivers_its_ranges() {
        let mut sensor = MockSensor {
            id: "front_lidar".to_string(),
            ranges: vec![1.0, 0.4],
        };
        assert_eq!(sensor.id(), "front_lidar");
        let scan = sensor.scan().unwrap();
        assert_eq!(scan.ranges, vec![1.0, 0.4]);
    }
}

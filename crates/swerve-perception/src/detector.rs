//! Obstacle detection over raw range sweeps.
//!
//! The reduction is deliberately crude: take the minimum of the whole sweep
//! and compare it against a fixed threshold.  There is no field-of-view
//! windowing (side and rear returns count the same as readings straight
//! ahead) and no filtering of invalid sensor values.  `f32::min` skips NaN
//! operands; infinite readings pass through and read as clear; negative
//! sentinels pass through and read as blocked.

use swerve_types::SwerveError;

/// Distance below which a reading counts as an obstacle (meters).
pub const DEFAULT_OBSTACLE_THRESHOLD_M: f32 = 0.5;

/// Result of reducing one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanSummary {
    /// Minimum distance seen anywhere in the sweep (meters).
    pub min_distance_m: f32,
    /// `true` when `min_distance_m` is strictly below the threshold.
    pub obstacle: bool,
}

/// Reduces a range sweep to a [`ScanSummary`].
///
/// # Example
///
/// ```rust
/// use swerve_perception::detector::ObstacleDetector;
///
/// let detector = ObstacleDetector::default();
/// let summary = detector.evaluate(&[1.2, 0.9, 0.3]).unwrap();
/// assert!(summary.obstacle);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObstacleDetector {
    threshold_m: f32,
}

impl ObstacleDetector {
    /// Create a detector with the given threshold (meters).
    pub fn new(threshold_m: f32) -> Self {
        Self { threshold_m }
    }

    /// The configured obstacle threshold (meters).
    pub fn threshold_m(&self) -> f32 {
        self.threshold_m
    }

    /// Reduce one sweep to its minimum distance and obstacle verdict.
    ///
    /// The comparison is strict: a minimum exactly at the threshold reads as
    /// clear.
    ///
    /// # Errors
    ///
    /// Returns [`SwerveError::EmptyScan`] when the sweep contains no
    /// readings.
    pub fn evaluate(&self, ranges: &[f32]) -> Result<ScanSummary, SwerveError> {
        if ranges.is_empty() {
            return Err(SwerveError::EmptyScan);
        }
        let min_distance_m = ranges.iter().copied().fold(f32::INFINITY, f32::min);
        Ok(ScanSummary {
            min_distance_m,
            obstacle: min_distance_m < self.threshold_m,
        })
    }
}

impl Default for ObstacleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_OBSTACLE_THRESHOLD_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_reading_raises_obstacle() {
        let summary = ObstacleDetector::default()
            .evaluate(&[1.2, 0.9, 0.3])
            .unwrap();
        assert!(summary.obstacle);
        assert!((summary.min_distance_m - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn distant_readings_stay_clear() {
        let summary = ObstacleDetector::default().evaluate(&[2.0, 1.5]).unwrap();
        assert!(!summary.obstacle);
        assert!((summary.min_distance_m - 1.5).abs() < f32::EPSILON);
    }

    /// The comparison is strict: exactly at the threshold reads as clear.
    #[test]
    fn minimum_exactly_at_threshold_is_clear() {
        let summary = ObstacleDetector::default().evaluate(&[0.5, 2.0]).unwrap();
        assert!(!summary.obstacle);
    }

    #[test]
    fn just_under_threshold_is_blocked() {
        let summary = ObstacleDetector::default().evaluate(&[0.499]).unwrap();
        assert!(summary.obstacle);
    }

    #[test]
    fn empty_sweep_is_a_defined_error() {
        let result = ObstacleDetector::default().evaluate(&[]);
        assert!(matches!(result, Err(SwerveError::EmptyScan)));
    }

    #[test]
    fn single_reading_sweep() {
        let summary = ObstacleDetector::default().evaluate(&[0.4]).unwrap();
        assert!(summary.obstacle);
    }

    #[test]
    fn custom_threshold_is_honored() {
        let detector = ObstacleDetector::new(1.0);
        assert!(detector.evaluate(&[0.9]).unwrap().obstacle);
        assert!(!detector.evaluate(&[1.0]).unwrap().obstacle);
    }

    // The next three pin the "raw minimum" behavior for invalid sensor
    // values.  None of these are detected or reported; the verdicts below
    // are a consequence of IEEE-754 min semantics, not a filtering policy.

    #[test]
    fn nan_readings_are_skipped_by_the_minimum() {
        let summary = ObstacleDetector::default()
            .evaluate(&[f32::NAN, 0.3, 2.0])
            .unwrap();
        assert!(summary.obstacle);
        assert!((summary.min_distance_m - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn all_infinite_sweep_reads_as_clear() {
        let summary = ObstacleDetector::default()
            .evaluate(&[f32::INFINITY, f32::INFINITY])
            .unwrap();
        assert!(!summary.obstacle);
    }

    #[test]
    fn negative_sentinel_reads_as_blocked() {
        let summary = ObstacleDetector::default().evaluate(&[-1.0, 3.0]).unwrap();
        assert!(summary.obstacle);
        assert!((summary.min_distance_m - (-1.0)).abs() < f32::EPSILON);
    }
}

//! Speed-threshold edge detection
//!
//! Turns a stream of speed samples into edge-triggered reached/missed events for the
//! session controller. A hysteresis band below the threshold keeps a speed hovering at the
//! threshold from flapping the session open and closed.

use anyhow::Result;

/// An edge crossing of the speed threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdEvent {
    /// Speed rose to or above the threshold
    Reached,
    /// Speed fell below the threshold minus the hysteresis
    Missed,
}

/// Which side of the threshold the last decisive sample fell on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Above,
    Below,
}

/// Detects threshold crossings in speed samples
#[derive(Debug, Clone)]
pub struct ThresholdDetector {
    /// Speed at or above which the threshold is reached
    threshold: f64,
    /// Distance below the threshold the speed must fall before it counts as missed
    hysteresis: f64,
    /// Last established level, `None` before the first decisive sample
    level: Option<Level>,
}

impl ThresholdDetector {
    /// Create a detector, rejecting a non-positive threshold or an out-of-range hysteresis
    pub fn new(threshold: f64, hysteresis: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            anyhow::bail!("Threshold must be a positive speed, got {}", threshold);
        }
        if !hysteresis.is_finite() || hysteresis < 0.0 || hysteresis >= threshold {
            anyhow::bail!(
                "Hysteresis must be between 0 and the threshold ({}), got {}",
                threshold,
                hysteresis
            );
        }
        Ok(Self {
            threshold,
            hysteresis,
            level: None,
        })
    }

    /// Get the threshold speed
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Get the hysteresis
    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    /// Whether the last decisive sample was at or above the threshold
    pub fn is_above(&self) -> bool {
        self.level == Some(Level::Above)
    }

    /// Feed a speed sample, returning an event when the level changes
    ///
    /// The first decisive sample establishes the level: above emits `Reached`, below emits
    /// nothing. Samples inside the hysteresis band and non-finite samples keep the current
    /// level.
    pub fn observe(&mut self, speed: f64) -> Option<ThresholdEvent> {
        if !speed.is_finite() {
            tracing::warn!(speed, "Ignoring non-finite speed sample");
            return None;
        }

        let sampled = if speed >= self.threshold {
            Level::Above
        } else if speed < self.threshold - self.hysteresis {
            Level::Below
        } else {
            return None;
        };

        let previous = self.level.replace(sampled);
        match (previous, sampled) {
            (Some(Level::Above), Level::Above) | (Some(Level::Below), Level::Below) => None,
            (_, Level::Above) => {
                tracing::debug!(speed, threshold = self.threshold, "Threshold reached");
                Some(ThresholdEvent::Reached)
            }
            (Some(Level::Above), Level::Below) => {
                tracing::debug!(speed, threshold = self.threshold, "Threshold missed");
                Some(ThresholdEvent::Missed)
            }
            (None, Level::Below) => None,
        }
    }

    /// Forget the established level
    pub fn reset(&mut self) {
        self.level = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ThresholdDetector {
        ThresholdDetector::new(40.0, 5.0).unwrap()
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(ThresholdDetector::new(0.0, 0.0).is_err());
        assert!(ThresholdDetector::new(-10.0, 0.0).is_err());
        assert!(ThresholdDetector::new(f64::NAN, 0.0).is_err());
        assert!(ThresholdDetector::new(40.0, -1.0).is_err());
        assert!(ThresholdDetector::new(40.0, 40.0).is_err());
        assert!(ThresholdDetector::new(40.0, 0.0).is_ok());
    }

    #[test]
    fn test_first_sample_below_is_silent() {
        let mut d = detector();
        assert_eq!(d.observe(0.0), None);
        assert!(!d.is_above());
    }

    #[test]
    fn test_first_sample_above_reaches() {
        let mut d = detector();
        assert_eq!(d.observe(120.0), Some(ThresholdEvent::Reached));
        assert!(d.is_above());
    }

    #[test]
    fn test_edges_only() {
        let mut d = detector();
        assert_eq!(d.observe(10.0), None);
        assert_eq!(d.observe(40.0), Some(ThresholdEvent::Reached));
        assert_eq!(d.observe(80.0), None);
        assert_eq!(d.observe(90.0), None);
        assert_eq!(d.observe(20.0), Some(ThresholdEvent::Missed));
        assert_eq!(d.observe(10.0), None);
        assert_eq!(d.observe(45.0), Some(ThresholdEvent::Reached));
    }

    #[test]
    fn test_hysteresis_band_holds_level() {
        let mut d = detector();
        assert_eq!(d.observe(41.0), Some(ThresholdEvent::Reached));
        // 35..40 is inside the band
        assert_eq!(d.observe(39.0), None);
        assert_eq!(d.observe(35.0), None);
        assert_eq!(d.observe(41.0), None);
        assert_eq!(d.observe(34.9), Some(ThresholdEvent::Missed));
        assert_eq!(d.observe(38.0), None);
        assert_eq!(d.observe(40.0), Some(ThresholdEvent::Reached));
    }

    #[test]
    fn test_first_sample_in_band_is_undecided() {
        let mut d = detector();
        assert_eq!(d.observe(37.0), None);
        assert_eq!(d.observe(30.0), None);
        assert_eq!(d.observe(50.0), Some(ThresholdEvent::Reached));
    }

    #[test]
    fn test_non_finite_samples_ignored() {
        let mut d = detector();
        d.observe(50.0);
        assert_eq!(d.observe(f64::NAN), None);
        assert_eq!(d.observe(f64::NEG_INFINITY), None);
        assert!(d.is_above());
    }

    #[test]
    fn test_reset() {
        let mut d = detector();
        d.observe(50.0);
        d.reset();
        assert!(!d.is_above());
        assert_eq!(d.observe(50.0), Some(ThresholdEvent::Reached));
    }
}

use crate::{AccuracyTier, DEFAULT_MINIMUM_HIGH, PeakGeometry, RetentionThresholds, ThresholdPolicy};

impl RetentionThresholds {
    /// Both window boundaries are inclusive
    #[must_use]
    pub fn tier(&self, observed_rt: f64, expected_rt: f64) -> AccuracyTier {
        let distance = (observed_rt - expected_rt).abs();
        if distance <= self.high {
            AccuracyTier::High
        } else if distance <= self.medium {
            AccuracyTier::Medium
        } else {
            AccuracyTier::Low
        }
    }
}

impl PeakGeometry {
    /// The distance from the apex to the closer of the two valleys
    #[must_use]
    pub fn half_width(&self) -> f64 {
        let left = self.apex - self.left_valley;
        let right = self.right_valley - self.apex;
        left.min(right).max(0.0)
    }
}

impl ThresholdPolicy {
    #[must_use]
    pub fn thresholds(&self, peak: &PeakGeometry) -> RetentionThresholds {
        match *self {
            Self::Fixed(thresholds) => thresholds,
            Self::PeakShape {
                minimum_high,
                medium_ceiling,
            } => {
                let half_width = peak.half_width();
                let high = (half_width / 3.0).max(minimum_high);
                let medium = 2.0 * half_width / 3.0;
                let medium = medium_ceiling.map_or(medium, |ceiling| medium.min(ceiling));
                RetentionThresholds::new(high, medium.max(high))
            }
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::PeakShape {
            minimum_high: DEFAULT_MINIMUM_HIGH,
            medium_ceiling: None,
        }
    }
}

use crate::core::error::{Result, VacuumError};
use tracing::warn;

/// Thresholds shared by the analyzer, repositioner and manager.
#[derive(Debug, Clone, PartialEq)]
pub struct VacuumConfig {
    /// Minimum gap size (Å) counted as a vacuum layer.
    pub threshold: f64,
    /// Fraction of the cell below which the lower end counts as "bottom".
    pub lower_fraction: f64,
    /// Fraction of the cell above which the upper end counts as "top".
    pub upper_fraction: f64,
    /// Smallest end gap (Å) that still counts as part of a split vacuum.
    pub split_threshold: f64,
    /// Thickness (Å) at or below which the vacuum is reported as suspiciously thin.
    pub thin_vacuum_warning: f64,
    /// Fraction of the cell at or above which the vacuum is reported as dominant.
    pub dominant_vacuum_ratio: f64,
    /// Requested thickness (Å) at or below which an adjustment warns.
    pub small_vacuum_warning: f64,
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            lower_fraction: 0.25,
            upper_fraction: 0.75,
            split_threshold: 1.0,
            thin_vacuum_warning: 2.0,
            dominant_vacuum_ratio: 0.9,
            small_vacuum_warning: 5.0,
        }
    }
}

impl VacuumConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Rejects unusable values. A threshold under 5 Å is accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0) {
            return Err(VacuumError::InvalidThreshold(self.threshold));
        }
        if self.threshold < 5.0 {
            warn!(
                threshold = self.threshold,
                "Small vacuum layer threshold of {} Å set. Make sure this is what you want.",
                self.threshold
            );
        }

        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.lower_fraction) || !in_unit(self.upper_fraction) {
            return Err(VacuumError::InvalidConfig(format!(
                "position fractions must lie in [0, 1], got lower={} upper={}",
                self.lower_fraction, self.upper_fraction
            )));
        }
        if self.lower_fraction > self.upper_fraction {
            return Err(VacuumError::InvalidConfig(format!(
                "lower fraction {} exceeds upper fraction {}",
                self.lower_fraction, self.upper_fraction
            )));
        }
        if self.split_threshold < 0.0 {
            return Err(VacuumError::InvalidConfig(format!(
                "split threshold cannot be negative, got {}",
                self.split_threshold
            )));
        }
        Ok(())
    }
}

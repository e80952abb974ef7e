//! Configuration errors
//!
//! Frame processing never fails: degenerate input degrades to sentinel
//! positions and a clamped centroid mass. The only fallible seam is
//! configuration, where [`GestureConfig::validate`](crate::config::GestureConfig::validate)
//! can reject values that would later divide by zero or collapse the
//! tracking hysteresis band.
//!
//! Variants stay `Copy` and heap-free so they can be returned from an
//! interrupt-driven command handler without allocation.
//!
//! ```rust
//! use gesture_core::{ConfigError, GestureConfig, GestureEngine};
//!
//! let mut engine = GestureEngine::default();
//! let mut cfg = GestureConfig::default();
//! cfg.tracking.track_width = 1.0;
//!
//! assert!(matches!(
//!     engine.try_configure(cfg),
//!     Err(ConfigError::TrackWindow { .. })
//! ));
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a configuration is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sample period must be positive and finite
    #[error("Sample period {period_ms} ms is not positive")]
    SamplePeriod {
        /// Offending period in milliseconds
        period_ms: f32,
    },

    /// ADC full scale of zero makes the calibration range gate meaningless
    #[error("ADC full scale must be non-zero")]
    AdcFullScale,

    /// A smoothing factor fell outside [0, 1]
    #[error("Filter alpha {value} for {name} outside [0, 1]")]
    AlphaOutOfRange {
        /// Which parameter
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Relative zero-clamp factor must be positive
    #[error("Zero clamp factor {value} for {name} is not positive")]
    ClampFactor {
        /// Which parameter
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Tracking window must span more than one pixel and fit the sensor
    #[error("Track window {width}x{height} outside (1, {max_width}]x(1, {max_height}]")]
    TrackWindow {
        /// Requested width in pixels
        width: f32,
        /// Requested height in pixels
        height: f32,
        /// Native sensor width
        max_width: f32,
        /// Native sensor height
        max_height: f32,
    },

    /// Full-scale divisor for the calibration range gate is zero
    #[error("Bias full-scale factor must be non-zero")]
    BiasFullscaleFactor,

    /// Tracking end threshold must sit strictly below the start threshold
    #[error("Hysteresis band collapsed: end {end} >= start {start}")]
    HysteresisBand {
        /// Start (entry) threshold
        start: i32,
        /// End (exit) threshold
        end: i32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SamplePeriod { period_ms } =>
                defmt::write!(fmt, "Sample period {} ms", period_ms),
            Self::AdcFullScale =>
                defmt::write!(fmt, "ADC full scale zero"),
            Self::AlphaOutOfRange { name, value } =>
                defmt::write!(fmt, "Alpha {}={} outside [0, 1]", name, value),
            Self::ClampFactor { name, value } =>
                defmt::write!(fmt, "Clamp factor {}={}", name, value),
            Self::TrackWindow { width, height, .. } =>
                defmt::write!(fmt, "Track window {}x{}", width, height),
            Self::BiasFullscaleFactor =>
                defmt::write!(fmt, "Bias full-scale factor zero"),
            Self::HysteresisBand { start, end } =>
                defmt::write!(fmt, "Hysteresis end {} >= start {}", end, start),
        }
    }
}

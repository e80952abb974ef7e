//! Configuration Store values
//!
//! [`GestureConfig`] is a plain `Copy` snapshot of every tunable. The
//! engine keeps its own copy; replacing it through
//! [`GestureEngine::configure`](crate::engine::GestureEngine::configure)
//! always resets both engines. Tracking-only parameters live in the nested
//! [`TrackingConfig`].
//!
//! Values are trusted as given. [`GestureConfig::validate`] is available for
//! callers that want degenerate settings rejected up front, and
//! [`GestureEngine::try_configure`](crate::engine::GestureEngine::try_configure)
//! runs it before applying.
//!
//! ```rust
//! use gesture_core::{EngineMode, GestureConfig, TrackingConfig};
//!
//! let cfg = GestureConfig::default()
//!     .with_engine_mode(EngineMode::Tracking)
//!     .with_window_filter(false, 0.5)
//!     .with_tracking(
//!         TrackingConfig::default()
//!             .with_detection_thresholds(500, 350)
//!             .with_track_window(8.0, 4.0),
//!     );
//!
//! assert!(cfg.validate().is_ok());
//! ```

use crate::constants::{defaults, SENSOR_XRES, SENSOR_YRES};
use crate::errors::{ConfigError, ConfigResult};

/// Which pixels a downstream streaming consumer should publish.
///
/// Carried for host tooling; the engine itself does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PixelDataMode {
    /// Raw sensor readout
    #[default]
    Raw,
    /// Bias-compensated pixels (tracking path)
    BiasCompensated,
    /// Background-subtracted pixels (gesture path)
    BackgroundSubtracted,
}

/// Engine run by the orchestrator on each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineMode {
    /// One-shot presence detection with background cancellation
    #[default]
    Dynamic,
    /// Persistent calibrated tracking with hysteresis
    Tracking,
}

/// Parameters used only by the tracking engine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackingConfig {
    /// Recalibrate bias automatically after a static period
    pub enable_auto_bias_calibration: bool,
    /// Milliseconds of static scene before a calibration commits
    pub static_state_bias_ms: u32,
    /// Low-pass smoothing factor; 1.0 disables filtering
    pub low_pass_filter_alpha: f32,
    /// Absolute floor for interpolated pixels
    pub zero_clamp_threshold: i32,
    /// Pixels below `peak / factor` are zeroed
    pub zero_clamp_threshold_factor: f32,
    /// Peak required to enter tracking
    pub start_detection_threshold: i32,
    /// Peak required to remain tracking; must be below the start threshold
    pub end_detection_threshold: i32,
    /// Largest drift from the reference frame still counted as static
    pub static_state_bias_delta_max: u32,
    /// Calibrate only while raw range < ADC full scale / this factor
    pub bias_fullscale_factor_max: u32,
    /// Width of the sub-window stretched over the full output range
    pub track_width: f32,
    /// Height of the sub-window stretched over the full output range
    pub track_height: f32,
    /// Apply zone gain correction
    pub enable_gain_correction: bool,
    /// Gain of the innermost zone
    pub gain_factor_0: f32,
    /// Gain of the middle ring
    pub gain_factor_1: f32,
    /// Gain of the outer border
    pub gain_factor_2: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enable_auto_bias_calibration: defaults::ENABLE_AUTO_BIAS_CALIBRATION,
            static_state_bias_ms: defaults::STATIC_STATE_BIAS_MS,
            low_pass_filter_alpha: defaults::TRACKING_LOW_PASS_FILTER_ALPHA,
            zero_clamp_threshold: defaults::TRACKING_ZERO_CLAMP_THRESHOLD,
            zero_clamp_threshold_factor: defaults::TRACKING_ZERO_CLAMP_THRESHOLD_FACTOR,
            start_detection_threshold: defaults::TRACKING_START_DETECTION_THRESHOLD,
            end_detection_threshold: defaults::TRACKING_END_DETECTION_THRESHOLD,
            static_state_bias_delta_max: defaults::STATIC_STATE_BIAS_DELTA_MAX,
            bias_fullscale_factor_max: defaults::BIAS_FULLSCALE_FACTOR_MAX,
            track_width: defaults::TRACK_WIDTH,
            track_height: defaults::TRACK_HEIGHT,
            enable_gain_correction: defaults::ENABLE_GAIN_CORRECTION,
            gain_factor_0: defaults::GAIN_FACTOR_0,
            gain_factor_1: defaults::GAIN_FACTOR_1,
            gain_factor_2: defaults::GAIN_FACTOR_2,
        }
    }
}

impl TrackingConfig {
    /// Set entry and exit thresholds of the hysteresis band
    pub fn with_detection_thresholds(mut self, start: i32, end: i32) -> Self {
        self.start_detection_threshold = start;
        self.end_detection_threshold = end;
        self
    }

    /// Set the sub-window mapped onto the output coordinate range
    pub fn with_track_window(mut self, width: f32, height: f32) -> Self {
        self.track_width = width;
        self.track_height = height;
        self
    }

    /// Enable or disable automatic bias calibration
    pub fn with_auto_calibration(mut self, enabled: bool) -> Self {
        self.enable_auto_bias_calibration = enabled;
        self
    }

    /// Set zone gains, innermost first, and enable gain correction
    pub fn with_gains(mut self, inner: f32, middle: f32, outer: f32) -> Self {
        self.enable_gain_correction = true;
        self.gain_factor_0 = inner;
        self.gain_factor_1 = middle;
        self.gain_factor_2 = outer;
        self
    }

    /// Enable or disable zone gain correction
    pub fn with_gain_correction(mut self, enabled: bool) -> Self {
        self.enable_gain_correction = enabled;
        self
    }

    /// Static frames that must elapse before a calibration commits.
    ///
    /// The period is truncated to whole milliseconds before dividing. The
    /// counter has to exceed this value, so a calibration lands on frame
    /// `static_bias_samples + 1` of a static run.
    pub fn static_bias_samples(&self, sample_period_ms: f32) -> u32 {
        // A period under 1 ms disables auto-calibration
        self.static_state_bias_ms
            .checked_div(sample_period_ms as u32)
            .unwrap_or(u32::MAX)
    }

    /// Upper bound (exclusive) on raw peak-to-trough range while calibrating
    pub fn calibration_range_limit(&self, adc_full_scale: u32) -> i32 {
        adc_full_scale
            .checked_div(self.bias_fullscale_factor_max)
            .map_or(i32::MAX, |limit| i32::try_from(limit).unwrap_or(i32::MAX))
    }

    fn validate(&self) -> ConfigResult<()> {
        check_alpha("tracking.low_pass_filter_alpha", self.low_pass_filter_alpha)?;
        check_clamp_factor(
            "tracking.zero_clamp_threshold_factor",
            self.zero_clamp_threshold_factor,
        )?;

        let max_width = SENSOR_XRES as f32;
        let max_height = SENSOR_YRES as f32;
        let width_ok = self.track_width > 1.0 && self.track_width <= max_width;
        let height_ok = self.track_height > 1.0 && self.track_height <= max_height;
        if !(width_ok && height_ok) {
            return Err(ConfigError::TrackWindow {
                width: self.track_width,
                height: self.track_height,
                max_width,
                max_height,
            });
        }

        if self.bias_fullscale_factor_max == 0 {
            return Err(ConfigError::BiasFullscaleFactor);
        }

        if self.end_detection_threshold >= self.start_detection_threshold {
            return Err(ConfigError::HysteresisBand {
                start: self.start_detection_threshold,
                end: self.end_detection_threshold,
            });
        }

        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Sensor is mounted upside-down; frames are rotated 180° on decode
    pub flip_sensor_pixels: bool,
    /// Which pixel stage host tooling should stream
    pub pixel_data_mode: PixelDataMode,
    /// Engine run on each frame
    pub engine_mode: EngineMode,
    /// Sensor sample period in milliseconds
    pub sample_period_ms: f32,
    /// ADC full-scale count for the current register settings
    pub adc_full_scale: u32,
    /// Long-average factor of the background filter
    pub background_filter_alpha: f32,
    /// Short-average factor of the background filter; 1.0 disables smoothing
    pub low_pass_filter_alpha: f32,
    /// Absolute floor for interpolated pixels
    pub zero_clamp_threshold: i32,
    /// Pixels below `peak / factor` are zeroed
    pub zero_clamp_threshold_factor: f32,
    /// Apply the 3-tap temporal window filter
    pub enable_window_filter: bool,
    /// Weight of the centre tap in the window filter
    pub window_filter_alpha: f32,
    /// Start threshold. Not consulted by the dynamic engine, which gates on
    /// `end_detection_threshold` alone.
    pub start_detection_threshold: i32,
    /// Peak at or above which the dynamic engine reports activity
    pub end_detection_threshold: i32,
    /// Tracking-only parameters
    pub tracking: TrackingConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flip_sensor_pixels: false,
            pixel_data_mode: PixelDataMode::Raw,
            engine_mode: EngineMode::Dynamic,
            sample_period_ms: defaults::SAMPLE_PERIOD_MS,
            adc_full_scale: defaults::ADC_FULL_SCALE,
            background_filter_alpha: defaults::BACKGROUND_FILTER_ALPHA,
            low_pass_filter_alpha: defaults::LOW_PASS_FILTER_ALPHA,
            zero_clamp_threshold: defaults::ZERO_CLAMP_THRESHOLD,
            zero_clamp_threshold_factor: defaults::ZERO_CLAMP_THRESHOLD_FACTOR,
            enable_window_filter: defaults::ENABLE_WINDOW_FILTER,
            window_filter_alpha: defaults::WINDOW_FILTER_ALPHA,
            start_detection_threshold: defaults::START_DETECTION_THRESHOLD,
            end_detection_threshold: defaults::END_DETECTION_THRESHOLD,
            tracking: TrackingConfig::default(),
        }
    }
}

impl GestureConfig {
    /// Select the engine run on each frame
    pub fn with_engine_mode(mut self, mode: EngineMode) -> Self {
        self.engine_mode = mode;
        self
    }

    /// Enable or disable the window filter and set its centre weight
    pub fn with_window_filter(mut self, enabled: bool, alpha: f32) -> Self {
        self.enable_window_filter = enabled;
        self.window_filter_alpha = alpha;
        self
    }

    /// Set the background filter's short and long averaging factors
    pub fn with_background_alphas(mut self, low_pass: f32, background: f32) -> Self {
        self.low_pass_filter_alpha = low_pass;
        self.background_filter_alpha = background;
        self
    }

    /// Set the dynamic engine's start and end thresholds
    pub fn with_detection_thresholds(mut self, start: i32, end: i32) -> Self {
        self.start_detection_threshold = start;
        self.end_detection_threshold = end;
        self
    }

    /// Replace the nested tracking parameters
    pub fn with_tracking(mut self, tracking: TrackingConfig) -> Self {
        self.tracking = tracking;
        self
    }

    /// Check the documented preconditions.
    ///
    /// The dynamic engine's `start`/`end` relationship is deliberately not
    /// checked: that engine only reads the end threshold.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.sample_period_ms > 0.0 && self.sample_period_ms.is_finite()) {
            return Err(ConfigError::SamplePeriod {
                period_ms: self.sample_period_ms,
            });
        }
        if self.adc_full_scale == 0 {
            return Err(ConfigError::AdcFullScale);
        }

        check_alpha("background_filter_alpha", self.background_filter_alpha)?;
        check_alpha("low_pass_filter_alpha", self.low_pass_filter_alpha)?;
        check_alpha("window_filter_alpha", self.window_filter_alpha)?;
        check_clamp_factor("zero_clamp_threshold_factor", self.zero_clamp_threshold_factor)?;

        self.tracking.validate()
    }
}

fn check_alpha(name: &'static str, value: f32) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::AlphaOutOfRange { name, value })
    }
}

fn check_clamp_factor(name: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ClampFactor { name, value })
    }
}

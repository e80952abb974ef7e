//! Default Configuration Values
//!
//! Factory tuning for the 400 µm sensor variant driven at its standard
//! register settings. `GestureConfig::default()` and
//! `TrackingConfig::default()` are built from these values.

// ===== DYNAMIC GESTURE DEFAULTS =====

/// Sensor sample period (ms). Roughly 50 Hz.
pub const SAMPLE_PERIOD_MS: f32 = 19.8;

/// ADC full-scale count for the default register configuration.
pub const ADC_FULL_SCALE: u32 = 16384;

/// Long-average smoothing factor for background cancellation.
///
/// Larger values track ambient changes faster, i.e. a more aggressive
/// high-pass filter.
pub const BACKGROUND_FILTER_ALPHA: f32 = 0.05;

/// Short-average smoothing factor. 1.0 disables low-pass filtering.
pub const LOW_PASS_FILTER_ALPHA: f32 = 1.0;

/// Absolute floor below which interpolated pixels are zeroed.
pub const ZERO_CLAMP_THRESHOLD: i32 = 10;

/// Pixels below `peak / factor` are zeroed to suppress optical clutter.
pub const ZERO_CLAMP_THRESHOLD_FACTOR: f32 = 6.0;

/// 3-tap temporal noise filter enabled by default.
pub const ENABLE_WINDOW_FILTER: bool = true;

/// Weight of the centre tap in the window filter.
pub const WINDOW_FILTER_ALPHA: f32 = 0.5;

/// Activation level to start a gesture (background corrected).
pub const START_DETECTION_THRESHOLD: i32 = 150;

/// Activation level below which a gesture ends (background corrected).
pub const END_DETECTION_THRESHOLD: i32 = 50;

// ===== TRACKING DEFAULTS =====

/// Automatic bias calibration enabled by default.
pub const ENABLE_AUTO_BIAS_CALIBRATION: bool = true;

/// Static duration (ms) before an automatic bias calibration commits.
pub const STATIC_STATE_BIAS_MS: u32 = 2000;

/// Tracking low-pass smoothing factor. 1.0 disables filtering.
pub const TRACKING_LOW_PASS_FILTER_ALPHA: f32 = 1.0;

/// Tracking absolute zero-clamp floor.
pub const TRACKING_ZERO_CLAMP_THRESHOLD: i32 = 50;

/// Tracking relative zero-clamp factor.
pub const TRACKING_ZERO_CLAMP_THRESHOLD_FACTOR: f32 = 6.0;

/// Bias-corrected peak needed to enter tracking.
pub const TRACKING_START_DETECTION_THRESHOLD: i32 = 400;

/// Bias-corrected peak needed to stay in tracking.
pub const TRACKING_END_DETECTION_THRESHOLD: i32 = 300;

/// Largest per-pixel drift from the reference still considered static.
pub const STATIC_STATE_BIAS_DELTA_MAX: u32 = 200;

/// Calibrate only while the raw range stays below `ADC_FULL_SCALE / factor`.
pub const BIAS_FULLSCALE_FACTOR_MAX: u32 = 2;

/// Width (pixels) of the sub-window mapped onto the full tracking range.
pub const TRACK_WIDTH: f32 = 6.0;

/// Height (pixels) of the sub-window mapped onto the full tracking range.
pub const TRACK_HEIGHT: f32 = 3.0;

/// Zone gain correction enabled by default.
pub const ENABLE_GAIN_CORRECTION: bool = true;

/// Gain of the innermost zone.
pub const GAIN_FACTOR_0: f32 = 0.5;

/// Gain of the middle ring.
pub const GAIN_FACTOR_1: f32 = 0.75;

/// Gain of the outer border.
pub const GAIN_FACTOR_2: f32 = 1.0;
